use std::fmt;

use crate::error::CoreError;

/// The check-in states of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VerificationState {
    /// Ticket has not been scanned at the gate yet.
    Unverified,
    /// Ticket has been scanned and accepted. Final state.
    Verified,
}

impl VerificationState {
    /// Whether this is a final (terminal) state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Project the `verified` flag stored on a record into a state.
    pub fn from_flag(verified: bool) -> Self {
        if verified {
            Self::Verified
        } else {
            Self::Unverified
        }
    }

    /// The `verified` flag for this state.
    pub fn as_flag(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for VerificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unverified => write!(f, "Unverified"),
            Self::Verified => write!(f, "Verified"),
        }
    }
}

/// Events that trigger verification state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationEvent {
    /// A scanner presented the ticket's reference id.
    Verify,
}

/// Applies verification events to registration states.
///
/// The only valid transition is Unverified → Verified (Verify). There is no
/// way back out of Verified.
pub struct VerificationStateMachine;

impl VerificationStateMachine {
    /// Attempt a state transition based on an event.
    pub fn transition(
        current: VerificationState,
        event: VerificationEvent,
    ) -> Result<VerificationState, CoreError> {
        let new_state = match (current, event) {
            (VerificationState::Unverified, VerificationEvent::Verify) => {
                VerificationState::Verified
            }
            (VerificationState::Verified, VerificationEvent::Verify) => {
                return Err(CoreError::InvalidStateTransition {
                    from: current,
                    to: VerificationState::Verified,
                });
            }
        };

        tracing::debug!(
            from = %current,
            to = %new_state,
            event = ?event,
            "verification state transition"
        );

        Ok(new_state)
    }

    /// Check if a transition is valid without performing it.
    pub fn can_transition(current: VerificationState, event: VerificationEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
