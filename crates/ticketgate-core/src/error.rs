use crate::verification_state::VerificationState;

/// Core errors raised while building or mutating the registry.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: VerificationState,
        to: VerificationState,
    },

    #[error("duplicate reference id in seed: {0}")]
    DuplicateReferenceId(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("seed file error: {0}")]
    SeedIo(#[from] std::io::Error),

    #[error("seed parse error: {0}")]
    SeedParse(#[from] toml::de::Error),
}

/// Failures of the verify operation that are not lookup results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The caller did not name a registration.
    #[error("reference id is required")]
    MissingId,

    /// Unexpected fault during lookup or mutation.
    #[error("internal error: {0}")]
    Internal(String),
}
