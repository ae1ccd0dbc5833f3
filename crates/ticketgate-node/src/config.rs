//! Node configuration loading and management.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ticketgate_core::{BuiltinSeed, RegistrationSource, SeedFile, DEFAULT_LINK_BASE};

/// Full configuration for the TicketGate node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TicketGateConfig {
    /// API server settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the registrations come from.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Ticket card settings.
    #[serde(default)]
    pub ticket: TicketConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API listen address.
    #[serde(default = "default_api_addr")]
    pub listen_addr: String,
    /// API port.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeedConfig {
    /// TOML file with `[[registrations]]`; the builtin demo seed is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Base URL encoded in ticket QR codes, followed by `/<referenceId>`.
    #[serde(default = "default_link_base")]
    pub link_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// Default value functions
fn default_api_addr() -> String {
    "127.0.0.1".into()
}
fn default_api_port() -> u16 {
    9101
}
fn default_link_base() -> String {
    DEFAULT_LINK_BASE.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_api_addr(),
            port: default_api_port(),
        }
    }
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            link_base: default_link_base(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl TicketGateConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: TicketGateConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Socket address the HTTP API binds to.
    pub fn api_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.api.listen_addr, self.api.port).parse()?;
        Ok(addr)
    }

    /// The configured seed source.
    pub fn registration_source(&self) -> Box<dyn RegistrationSource> {
        match &self.seed.path {
            Some(path) => Box::new(SeedFile::new(path)),
            None => Box::new(BuiltinSeed),
        }
    }
}
