//! One scan: extract the reference id, ask the node, classify the answer.

use std::fmt;

use ticketgate_core::wire::CODE_ALREADY_VERIFIED;
use ticketgate_core::RegistrationRecord;

use crate::client::{VerifierClient, VerifyReply};
use crate::error::ExtractError;
use crate::extract::extract_reference_id;

/// What the gate operator should be told about a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// First check-in of a valid ticket.
    Verified(RegistrationRecord),
    /// Valid ticket that was checked in before.
    AlreadyVerified(Option<RegistrationRecord>),
    /// The node has no registration with this id.
    NotFound,
    /// The payload did not yield a reference id; nothing was sent.
    InvalidFormat(ExtractError),
    /// The node refused the request (HTTP 400).
    Rejected(String),
    /// The node failed or answered with something unexpected.
    ServerError { status: u16, message: String },
    /// The node could not be reached.
    NetworkError(String),
}

impl ScanOutcome {
    /// Stable code for logs and scripts.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Verified(_) => "VERIFIED",
            Self::AlreadyVerified(_) => "ALREADY_VERIFIED",
            Self::NotFound => "INVALID_REFERENCE_ID",
            Self::InvalidFormat(_) => "INVALID_FORMAT",
            Self::Rejected(_) => "BAD_REQUEST",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::NetworkError(_) => "NETWORK_ERROR",
        }
    }

    /// Whether the ticket holder is a known registration.
    pub fn is_admissible(&self) -> bool {
        matches!(self, Self::Verified(_) | Self::AlreadyVerified(_))
    }

    /// The registration details returned by the node, if any.
    pub fn record(&self) -> Option<&RegistrationRecord> {
        match self {
            Self::Verified(r) => Some(r),
            Self::AlreadyVerified(r) => r.as_ref(),
            _ => None,
        }
    }

    /// Map a verify reply onto an outcome.
    pub fn from_reply(reply: VerifyReply) -> Self {
        let VerifyReply { status, body } = reply;
        match status {
            200 if body.is_success() => match body.data {
                Some(record) => Self::Verified(record),
                None => Self::ServerError {
                    status,
                    message: "verified response without registration data".into(),
                },
            },
            200 if body.error.as_deref() == Some(CODE_ALREADY_VERIFIED) => {
                Self::AlreadyVerified(body.data)
            }
            404 => Self::NotFound,
            400 => Self::Rejected(body.error.unwrap_or_else(|| "bad request".into())),
            _ => Self::ServerError {
                status,
                message: body
                    .message
                    .or(body.error)
                    .unwrap_or_else(|| "unexpected response".into()),
            },
        }
    }
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified(r) => write!(f, "Ticket verified: welcome {}", r.name),
            Self::AlreadyVerified(_) => write!(f, "Ticket already verified"),
            Self::NotFound => write!(f, "Registration not found"),
            Self::InvalidFormat(e) => write!(f, "{}", e),
            Self::Rejected(msg) => write!(f, "Request rejected: {}", msg),
            Self::ServerError { status, message } => {
                write!(f, "Server error (HTTP {}): {}", status, message)
            }
            Self::NetworkError(e) => write!(f, "Failed to verify ticket: {}", e),
        }
    }
}

/// Result of scanning one payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// The decoded QR text as received.
    pub payload: String,
    /// The id sent to the node, when extraction succeeded.
    pub reference_id: Option<String>,
    pub outcome: ScanOutcome,
}

/// Drives extraction and verification for decoded payloads.
pub struct Scanner {
    client: VerifierClient,
}

impl Scanner {
    pub fn new(client: VerifierClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &VerifierClient {
        &self.client
    }

    /// Scan one payload. Never retries; a failed call is reported as is.
    pub async fn scan(&self, payload: &str) -> ScanReport {
        let reference_id = match extract_reference_id(payload) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(payload, error = %e, "could not extract reference id");
                return ScanReport {
                    payload: payload.to_string(),
                    reference_id: None,
                    outcome: ScanOutcome::InvalidFormat(e),
                };
            }
        };

        let outcome = match self.client.verify(&reference_id).await {
            Ok(reply) => ScanOutcome::from_reply(reply),
            Err(e) => {
                tracing::warn!(reference_id = %reference_id, error = %e, "verify request failed");
                ScanOutcome::NetworkError(e.to_string())
            }
        };

        tracing::info!(
            reference_id = %reference_id,
            outcome = outcome.code(),
            "scan complete"
        );

        ScanReport {
            payload: payload.to_string(),
            reference_id: Some(reference_id),
            outcome,
        }
    }
}
