//! Sources for the registration set loaded at startup.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::CoreError;
use crate::types::RegistrationRecord;

/// Anything that can hand the node its initial registrations.
pub trait RegistrationSource: Send + Sync {
    /// Produce the seed records in display order.
    fn load(&self) -> Result<Vec<RegistrationRecord>, CoreError>;

    /// Short human-readable label for logs.
    fn describe(&self) -> String;
}

/// The demo registration shipped with the service.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSeed;

impl RegistrationSource for BuiltinSeed {
    fn load(&self) -> Result<Vec<RegistrationRecord>, CoreError> {
        Ok(vec![RegistrationRecord {
            reference_id: "4234567890".into(),
            name: "Subham Karmakar".into(),
            username: "Subham K".into(),
            kind: "Visitor".into(),
            event_name: "Techfest".into(),
            event_time: "10:00 AM - 5:00 PM".into(),
            team_name: "Team Alpha".into(),
            day: "Day 1".into(),
            verified: false,
        }])
    }

    fn describe(&self) -> String {
        "builtin".into()
    }
}

/// A TOML file holding `[[registrations]]` tables.
///
/// ```toml
/// [[registrations]]
/// referenceId = "4234567890"
/// name = "Subham Karmakar"
/// username = "Subham K"
/// type = "Visitor"
/// eventName = "Techfest"
/// eventTime = "10:00 AM - 5:00 PM"
/// teamName = "Team Alpha"
/// day = "Day 1"
/// ```
#[derive(Debug, Clone)]
pub struct SeedFile {
    path: PathBuf,
}

#[derive(Deserialize)]
struct SeedDocument {
    #[serde(default)]
    registrations: Vec<RegistrationRecord>,
}

impl SeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse seed records from TOML text.
    pub fn parse(contents: &str) -> Result<Vec<RegistrationRecord>, CoreError> {
        let doc: SeedDocument = toml::from_str(contents)?;
        Ok(doc.registrations)
    }
}

impl RegistrationSource for SeedFile {
    fn load(&self) -> Result<Vec<RegistrationRecord>, CoreError> {
        let contents = std::fs::read_to_string(&self.path)?;
        let records = Self::parse(&contents)?;
        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            "loaded registration seed file"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
