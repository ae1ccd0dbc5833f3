//! Fixtures for end-to-end tests: a node on an ephemeral loopback port.

use ticketgate_core::{RegistrationRecord, RegistrationRegistry};
use ticketgate_node::{TicketGateConfig, TicketGateNode};
use ticketgate_scanner::{Scanner, VerifierClient};

/// Build a registration with predictable fields.
pub fn registration(reference_id: &str, verified: bool) -> RegistrationRecord {
    RegistrationRecord {
        reference_id: reference_id.to_string(),
        name: format!("Guest {}", reference_id),
        username: format!("guest-{}", reference_id),
        kind: "Attendee".into(),
        event_name: "Techfest".into(),
        event_time: "10:00 AM - 5:00 PM".into(),
        team_name: "Team Omega".into(),
        day: "Day 3".into(),
        verified,
    }
}

/// Start a node with the builtin seed and return its base URL.
pub async fn spawn_builtin_node() -> String {
    let mut config = TicketGateConfig::default();
    config.api.port = 0;
    let node = TicketGateNode::new(config).expect("node creation");
    launch(node).await
}

/// Start a node over the given registrations and return its base URL.
pub async fn spawn_node_with(records: Vec<RegistrationRecord>) -> String {
    let mut config = TicketGateConfig::default();
    config.api.port = 0;
    let registry = RegistrationRegistry::new(records).expect("valid registrations");
    launch(TicketGateNode::with_registry(config, registry)).await
}

async fn launch(mut node: TicketGateNode) -> String {
    let addr = node.start().await.expect("node start");
    tokio::spawn(async move {
        if let Err(e) = node.run().await {
            tracing::error!(error = %e, "test node loop failed");
        }
    });
    format!("http://{}", addr)
}

/// A scanner pointed at `base`.
pub fn scanner_for(base: &str) -> Scanner {
    Scanner::new(VerifierClient::new(base).expect("valid endpoint"))
}
