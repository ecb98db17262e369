//! State machine for the invitation lifecycle
//!
//! The invitation state is derived, never stored: it is recomputed from the
//! entity's current references and persistence flag on every query. The
//! machine defines:
//! - Valid states
//! - Events that trigger transitions
//! - Guard conditions for transitions
//! - Terminal states

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} via {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

/// Derived invitation state.
///
/// Persistence alone cannot describe why a record is unsaved, so the two
/// unsaved situations get distinct states: an unsaved-but-valid invitation
/// is `Pending` (about to be sent), an unsaved-and-invalid one is `Invalid`
/// (rejected until its references are corrected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationState {
    Invalid,
    Pending,
    Completed,
}

impl InvitationState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Get all valid next states reachable by an event.
    ///
    /// `Invalid` lists none: it is left by correcting the entity's
    /// references, which recomputes the state, not by an event.
    pub fn valid_transitions(&self) -> &'static [InvitationState] {
        match self {
            Self::Invalid => &[],
            Self::Pending => &[Self::Completed],
            Self::Completed => &[],
        }
    }
}

impl std::fmt::Display for InvitationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid => write!(f, "invalid"),
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Events that trigger invitation state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvitationEvent {
    /// A save request passed validation and the record was durably stored
    Persist,
}

impl std::fmt::Display for InvitationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persist => write!(f, "persist"),
        }
    }
}

/// Guard context for invitation transitions
#[derive(Debug, Clone)]
pub struct InvitationGuardContext {
    /// Verdict of the validator at the moment the event fires
    pub is_valid: bool,
}

/// Invitation state machine
pub struct InvitationStateMachine;

impl InvitationStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: InvitationState,
        event: InvitationEvent,
        context: Option<&InvitationGuardContext>,
    ) -> Result<InvitationState, StateError> {
        // Check for terminal state
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (InvitationState::Pending, InvitationEvent::Persist) => {
                // Guard: the record must still pass validation
                if let Some(ctx) = context {
                    if !ctx.is_valid {
                        return Err(StateError::GuardFailed(
                            "cannot persist an invitation that fails validation".to_string(),
                        ));
                    }
                }
                InvitationState::Completed
            }
            (InvitationState::Invalid, InvitationEvent::Persist) => {
                return Err(StateError::GuardFailed(
                    "cannot persist an invitation with missing references".to_string(),
                ));
            }

            // Invalid transitions
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(
        current: InvitationState,
        event: &InvitationEvent,
        context: Option<&InvitationGuardContext>,
    ) -> bool {
        Self::transition(current, *event, context).is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
