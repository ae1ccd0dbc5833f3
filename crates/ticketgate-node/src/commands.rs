//! Commands dispatched from the HTTP API to the node event loop.

use tokio::sync::oneshot;

use ticketgate_core::{
    RegistrationRecord, RegistryStats, TicketCard, VerificationOutcome, VerifyError,
};

/// A command sent from the HTTP API to the node's main event loop.
pub enum NodeCommand {
    /// Check a ticket in.
    Verify {
        reference_id: String,
        reply: oneshot::Sender<Result<VerificationOutcome, VerifyError>>,
    },
    /// Build the ticket card for one registration.
    GetTicket {
        reference_id: String,
        reply: oneshot::Sender<Option<TicketCard>>,
    },
    /// Snapshot every registration.
    ListRegistrations {
        reply: oneshot::Sender<Vec<RegistrationRecord>>,
    },
    /// Verified/pending counts.
    Stats {
        reply: oneshot::Sender<RegistryStats>,
    },
}
