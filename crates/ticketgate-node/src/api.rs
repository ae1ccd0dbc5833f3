//! HTTP API server for the TicketGate node.
//!
//! Provides the verify endpoint scanners post to, plus read-only endpoints
//! for health, status, registration listing and ticket cards.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use ticketgate_core::wire::{
    ErrorResponse, HealthResponse, RegistrationsResponse, StatusResponse, VerifyResponse,
    MSG_NOT_FOUND,
};
use ticketgate_core::{TicketCard, VerificationOutcome, VerifyError};

use crate::commands::NodeCommand;
use crate::state::NodeState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// What the verify body asked for.
#[derive(Debug, PartialEq, Eq)]
enum RequestedId {
    Id(String),
    /// Absent or falsy `referenceId`.
    Missing,
    /// Present but not a string, so it can never equal a stored id.
    Unmatchable,
    /// The body could not be read as an object at all.
    Malformed,
}

fn requested_id(body: &Value) -> RequestedId {
    match body {
        Value::Null => RequestedId::Malformed,
        Value::Object(map) => match map.get("referenceId") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => RequestedId::Missing,
            Some(Value::String(s)) if s.is_empty() => RequestedId::Missing,
            Some(Value::String(s)) => RequestedId::Id(s.clone()),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => RequestedId::Missing,
            Some(_) => RequestedId::Unmatchable,
        },
        _ => RequestedId::Missing,
    }
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn outcome_response(outcome: VerificationOutcome) -> (StatusCode, Json<VerifyResponse>) {
    let status = status_of(outcome.http_status());
    (status, Json(VerifyResponse::from_outcome(outcome)))
}

fn error_response(err: VerifyError) -> (StatusCode, Json<VerifyResponse>) {
    if let VerifyError::Internal(ref detail) = err {
        tracing::error!(error = %detail, "verification error");
    }
    (status_of(err.http_status()), Json(VerifyResponse::from_error(&err)))
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_verify(
    State(state): State<Arc<NodeState>>,
    body: Bytes,
) -> (StatusCode, Json<VerifyResponse>) {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return error_response(VerifyError::Internal(format!("invalid JSON body: {e}"))),
    };

    let reference_id = match requested_id(&value) {
        RequestedId::Id(id) => id,
        RequestedId::Missing => return error_response(VerifyError::MissingId),
        RequestedId::Unmatchable => {
            tracing::info!(reference_id = %value["referenceId"], "verify: non-string reference id");
            return outcome_response(VerificationOutcome::NotFound);
        }
        RequestedId::Malformed => {
            return error_response(VerifyError::Internal("request body is null".into()))
        }
    };

    let result = dispatch(&state, |reply| NodeCommand::Verify {
        reference_id,
        reply,
    })
    .await;

    match result {
        Ok(Ok(outcome)) => outcome_response(outcome),
        Ok(Err(e)) => error_response(e),
        Err(e) => error_response(VerifyError::Internal(e)),
    }
}

async fn handle_status(State(state): State<Arc<NodeState>>) -> Result<Json<StatusResponse>, ApiError> {
    let stats = dispatch(&state, |reply| NodeCommand::Stats { reply })
        .await
        .map_err(internal_error)?;
    Ok(Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        total: stats.total,
        verified: stats.verified,
        pending: stats.pending,
    }))
}

async fn handle_registrations(
    State(state): State<Arc<NodeState>>,
) -> Result<Json<RegistrationsResponse>, ApiError> {
    let registrations = dispatch(&state, |reply| NodeCommand::ListRegistrations { reply })
        .await
        .map_err(internal_error)?;
    let count = registrations.len();
    Ok(Json(RegistrationsResponse {
        registrations,
        count,
    }))
}

async fn handle_ticket(
    State(state): State<Arc<NodeState>>,
    Path(reference_id): Path<String>,
) -> Result<Json<TicketCard>, ApiError> {
    let card = dispatch(&state, |reply| NodeCommand::GetTicket {
        reference_id,
        reply,
    })
    .await
    .map_err(internal_error)?;

    card.map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: MSG_NOT_FOUND.into(),
            }),
        )
    })
}

fn internal_error(detail: String) -> ApiError {
    tracing::error!(error = %detail, "API command failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".into(),
        }),
    )
}

/// Send a command to the event loop and await its reply.
async fn dispatch<T>(
    state: &Arc<NodeState>,
    build: impl FnOnce(oneshot::Sender<T>) -> NodeCommand,
) -> Result<T, String> {
    let (reply_tx, reply_rx) = oneshot::channel();

    state
        .command_tx
        .send(build(reply_tx))
        .await
        .map_err(|_| "node event loop not running".to_string())?;

    reply_rx
        .await
        .map_err(|_| "event loop dropped the reply channel".to_string())
}

// --- Server ---

pub fn build_router(state: Arc<NodeState>) -> Router {
    Router::new()
        .route("/api/verify", post(handle_verify))
        .route("/api/v1/verify", post(handle_verify))
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/registrations", get(handle_registrations))
        .route(
            "/api/v1/registrations/{reference_id}/ticket",
            get(handle_ticket),
        )
        .with_state(state)
}

/// Serve the API on an already-bound listener until the server stops.
pub async fn serve_api(listener: TcpListener, state: Arc<NodeState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let listen_addr = listener.local_addr()?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
