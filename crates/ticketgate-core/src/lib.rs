//! TicketGate Core — Registration records, the verify-once state machine,
//! and the wire contract shared by the verifier node and the scanner client.

pub mod error;
pub mod registry;
pub mod seed;
pub mod types;
pub mod verification_state;
pub mod wire;

pub use error::{CoreError, VerifyError};
pub use registry::{RegistrationRegistry, RegistryStats, VerificationOutcome};
pub use seed::{BuiltinSeed, RegistrationSource, SeedFile};
pub use types::{RegistrationRecord, TicketCard, DEFAULT_LINK_BASE};
pub use verification_state::{VerificationEvent, VerificationState, VerificationStateMachine};
pub use wire::{
    ErrorResponse, HealthResponse, RegistrationsResponse, StatusResponse, VerifyRequest,
    VerifyResponse,
};
