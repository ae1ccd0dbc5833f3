//! The in-memory registration registry and the verify operation.

use std::collections::HashSet;

use crate::error::{CoreError, VerifyError};
use crate::seed::RegistrationSource;
use crate::types::{RegistrationRecord, TicketCard};
use crate::verification_state::{VerificationEvent, VerificationState, VerificationStateMachine};

/// Result of a verify call that reached the lookup stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// First scan of this ticket; the snapshot shows `verified = true`.
    Success(RegistrationRecord),
    /// Ticket was already checked in. Nothing changed.
    AlreadyVerified(RegistrationRecord),
    /// No registration carries this reference id.
    NotFound,
}

/// Counts over the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
}

/// Owns the seeded registrations for the lifetime of the process.
///
/// Records are never added or removed after construction. Mutation goes
/// through [`RegistrationRegistry::verify`], which needs `&mut self`, so a
/// single owner serializes every check-in.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRegistry {
    records: Vec<RegistrationRecord>,
}

impl RegistrationRegistry {
    /// Build a registry from seed records, rejecting empty or duplicate ids.
    pub fn new(records: Vec<RegistrationRecord>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.reference_id.is_empty() {
                return Err(CoreError::InvalidSeed(format!(
                    "registration for '{}' has an empty reference id",
                    record.name
                )));
            }
            if !seen.insert(record.reference_id.as_str()) {
                return Err(CoreError::DuplicateReferenceId(record.reference_id.clone()));
            }
        }

        tracing::debug!(count = records.len(), "registration registry built");
        Ok(Self { records })
    }

    /// Build a registry from whatever the source yields.
    pub fn from_source(source: &dyn RegistrationSource) -> Result<Self, CoreError> {
        Self::new(source.load()?)
    }

    /// Check a ticket in by reference id.
    ///
    /// Flips `verified` from false to true at most once per record. Later
    /// calls for the same id report [`VerificationOutcome::AlreadyVerified`]
    /// and leave the record untouched.
    pub fn verify(&mut self, reference_id: &str) -> Result<VerificationOutcome, VerifyError> {
        if reference_id.is_empty() {
            return Err(VerifyError::MissingId);
        }

        let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.reference_id == reference_id)
        else {
            tracing::info!(reference_id, "verify: unknown reference id");
            return Ok(VerificationOutcome::NotFound);
        };

        let current = record.state();
        if current == VerificationState::Verified {
            tracing::info!(reference_id, "verify: ticket already verified");
            return Ok(VerificationOutcome::AlreadyVerified(record.clone()));
        }

        let next = VerificationStateMachine::transition(current, VerificationEvent::Verify)
            .map_err(|e| VerifyError::Internal(e.to_string()))?;
        record.set_state(next);

        tracing::info!(reference_id, name = %record.name, "registration verified");
        Ok(VerificationOutcome::Success(record.clone()))
    }

    /// Snapshot of one record.
    pub fn get(&self, reference_id: &str) -> Option<RegistrationRecord> {
        self.records
            .iter()
            .find(|r| r.reference_id == reference_id)
            .cloned()
    }

    /// All records in seed order.
    pub fn records(&self) -> &[RegistrationRecord] {
        &self.records
    }

    /// Ticket card for one record.
    pub fn ticket(&self, reference_id: &str, link_base: &str) -> Option<TicketCard> {
        self.records
            .iter()
            .find(|r| r.reference_id == reference_id)
            .map(|r| TicketCard::new(r, link_base))
    }

    pub fn stats(&self) -> RegistryStats {
        let verified = self.records.iter().filter(|r| r.verified).count();
        RegistryStats {
            total: self.records.len(),
            verified,
            pending: self.records.len() - verified,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
