//! Audit statement for the invitation lifecycle
//!
//! The statement is derived from entity state on every call: compute the
//! state once as a tagged variant, then format the matching branch. Pure
//! and non-blocking, so it is safe to call at any lifecycle point with no
//! synchronization.

use crate::domain::entities::Invitation;
use crate::domain::state::InvitationState;

/// Render a single-line audit statement for the invitation.
///
/// - `Invalid` statements carry the literal marker `INVALID` and name the
///   missing reference(s).
/// - `Pending` statements carry the literal marker `PENDING`, the team name
///   and the invitee email.
/// - `Completed` statements carry the team name and invitee email with no
///   marker.
pub(crate) fn event_log_statement(invitation: &Invitation) -> String {
    match (invitation.state(), invitation.team(), invitation.invitee()) {
        (InvitationState::Pending, Some(team), Some(invitee)) => format!(
            "PENDING invitation {}: {} invited to join {}",
            invitation.id,
            single_line(&invitee.email),
            single_line(&team.name),
        ),
        (InvitationState::Completed, Some(team), Some(invitee)) => format!(
            "invitation {} saved: {} invited to join {}",
            invitation.id,
            single_line(&invitee.email),
            single_line(&team.name),
        ),
        (_, team, invitee) => {
            let missing = match (team, invitee) {
                (None, None) => "team and invitee",
                (None, Some(_)) => "team",
                (Some(_), None) => "invitee",
                (Some(_), Some(_)) => "eligibility",
            };
            format!("INVALID invitation {}: missing {}", invitation.id, missing)
        }
    }
}

/// Collapse control characters so the statement stays one log line
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
