//! JSON contract of the verify endpoint.
//!
//! The node serializes these types and the scanner client deserializes
//! them, so both sides agree on keys, messages and error codes.

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;
use crate::registry::VerificationOutcome;
use crate::types::RegistrationRecord;

pub const MSG_VERIFIED: &str = "Registration verified successfully";
pub const MSG_ALREADY_VERIFIED: &str = "Ticket already verified";
pub const MSG_NOT_FOUND: &str = "Registration not found";
pub const MSG_MISSING_ID: &str = "Reference ID is required";
pub const MSG_INTERNAL: &str = "Internal server error";

pub const CODE_ALREADY_VERIFIED: &str = "ALREADY_VERIFIED";
pub const CODE_INVALID_REFERENCE_ID: &str = "INVALID_REFERENCE_ID";

/// Body of `POST /api/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub reference_id: String,
}

/// Body of every verify response. Absent fields are omitted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RegistrationRecord>,
}

/// Plain `{ error }` body used by the non-verify endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of `GET /api/v1/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub version: String,
    pub uptime_secs: u64,
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
}

/// Body of `GET /api/v1/registrations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationsResponse {
    pub registrations: Vec<RegistrationRecord>,
    pub count: usize,
}

impl VerifyResponse {
    pub fn from_outcome(outcome: VerificationOutcome) -> Self {
        match outcome {
            VerificationOutcome::Success(record) => Self {
                success: Some(true),
                message: Some(MSG_VERIFIED.into()),
                error: None,
                data: Some(record),
            },
            VerificationOutcome::AlreadyVerified(record) => Self {
                success: Some(false),
                message: Some(MSG_ALREADY_VERIFIED.into()),
                error: Some(CODE_ALREADY_VERIFIED.into()),
                data: Some(record),
            },
            VerificationOutcome::NotFound => Self {
                success: Some(false),
                message: Some(MSG_NOT_FOUND.into()),
                error: Some(CODE_INVALID_REFERENCE_ID.into()),
                data: None,
            },
        }
    }

    pub fn from_error(err: &VerifyError) -> Self {
        let error = match err {
            VerifyError::MissingId => MSG_MISSING_ID,
            VerifyError::Internal(_) => MSG_INTERNAL,
        };
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Whether the server reported a first-time check-in.
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

impl VerificationOutcome {
    /// HTTP status the verify endpoint answers with.
    ///
    /// A re-scan is still a 200; callers tell it apart by `success = false`.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Success(_) | Self::AlreadyVerified(_) => 200,
            Self::NotFound => 404,
        }
    }
}

impl VerifyError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MissingId => 400,
            Self::Internal(_) => 500,
        }
    }
}
