//! Registration records and the ticket card view derived from them.

use serde::{Deserialize, Serialize};

use crate::verification_state::VerificationState;

/// Base URL that ticket QR links are built from when none is configured.
pub const DEFAULT_LINK_BASE: &str = "https://example.com/registration";

/// One ticket holder's registration, keyed by `reference_id`.
///
/// Serialized with the camelCase keys the verify endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub reference_id: String,
    pub name: String,
    pub username: String,
    /// Ticket category, e.g. "Visitor" or "Attendee".
    #[serde(rename = "type")]
    pub kind: String,
    pub event_name: String,
    pub event_time: String,
    pub team_name: String,
    pub day: String,
    #[serde(default)]
    pub verified: bool,
}

impl RegistrationRecord {
    /// Current check-in state of this record.
    pub fn state(&self) -> VerificationState {
        VerificationState::from_flag(self.verified)
    }

    pub(crate) fn set_state(&mut self, state: VerificationState) {
        self.verified = state.as_flag();
    }
}

/// What a rendered ticket card shows, including the QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCard {
    pub reference_id: String,
    pub name: String,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub event_name: String,
    pub event_time: String,
    pub team_name: String,
    pub day: String,
    /// Text encoded in the card's QR code.
    pub link: String,
}

impl TicketCard {
    /// Build the card for `record`, linking to `<link_base>/<reference_id>`.
    pub fn new(record: &RegistrationRecord, link_base: &str) -> Self {
        Self {
            reference_id: record.reference_id.clone(),
            name: record.name.clone(),
            username: record.username.clone(),
            kind: record.kind.clone(),
            event_name: record.event_name.clone(),
            event_time: record.event_time.clone(),
            team_name: record.team_name.clone(),
            day: record.day.clone(),
            link: ticket_link(link_base, &record.reference_id),
        }
    }
}

/// Join a link base and a reference id with exactly one `/`.
pub fn ticket_link(link_base: &str, reference_id: &str) -> String {
    format!("{}/{}", link_base.trim_end_matches('/'), reference_id)
}
