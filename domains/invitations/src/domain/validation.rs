//! Validation predicates for invitations
//!
//! Presence checks live here as plain functions so they can be tested in
//! isolation and called any number of times without touching entity state.
//! Collaborators can layer additional eligibility rules on top through
//! [`Validator`]; the rules are evaluated as part of the same boolean
//! verdict the presence check produces.

use thiserror::Error;

use crate::domain::entities::{Invitation, Team, User};

/// Why an invitation failed validation.
///
/// Recoverable: the caller may correct the references and retry the save.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invitation has no team")]
    MissingTeam,

    #[error("invitation has no invitee")]
    MissingInvitee,

    #[error("invitation has no team and no invitee")]
    MissingTeamAndInvitee,

    #[error("invitation was rejected by an eligibility rule")]
    Ineligible,
}

impl ValidationError {
    /// Whether the team reference was absent
    pub fn missing_team(&self) -> bool {
        matches!(self, Self::MissingTeam | Self::MissingTeamAndInvitee)
    }

    /// Whether the invitee reference was absent
    pub fn missing_invitee(&self) -> bool {
        matches!(self, Self::MissingInvitee | Self::MissingTeamAndInvitee)
    }
}

/// Check the core presence rule: both team and invitee must be set.
///
/// Pure, side-effect free, callable any number of times.
pub fn check(invitation: &Invitation) -> Result<(), ValidationError> {
    match (invitation.team(), invitation.invitee()) {
        (Some(_), Some(_)) => Ok(()),
        (None, Some(_)) => Err(ValidationError::MissingTeam),
        (Some(_), None) => Err(ValidationError::MissingInvitee),
        (None, None) => Err(ValidationError::MissingTeamAndInvitee),
    }
}

/// Boolean form of [`check`]
pub fn is_well_formed(invitation: &Invitation) -> bool {
    check(invitation).is_ok()
}

/// An eligibility rule layered on top of the presence check
pub type EligibilityCheck = Box<dyn Fn(&Team, &User) -> bool + Send + Sync>;

/// Validator combining the presence rule with injected eligibility checks.
///
/// The default validator is the presence rule alone.
#[derive(Default)]
pub struct Validator {
    checks: Vec<EligibilityCheck>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an eligibility rule evaluated against the team and invitee
    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&Team, &User) -> bool + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Run the presence rule, then every eligibility rule in order
    pub fn check(&self, invitation: &Invitation) -> Result<(), ValidationError> {
        check(invitation)?;

        let (Some(team), Some(invitee)) = (invitation.team(), invitation.invitee()) else {
            return Err(ValidationError::MissingTeamAndInvitee);
        };

        if self.checks.iter().all(|rule| rule(team, invitee)) {
            Ok(())
        } else {
            Err(ValidationError::Ineligible)
        }
    }

    /// Boolean form of [`Validator::check`]
    pub fn is_valid(&self, invitation: &Invitation) -> bool {
        self.check(invitation).is_ok()
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("eligibility_checks", &self.checks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team::new("A fine team".to_string()).unwrap()
    }

    fn user() -> User {
        User::new("rookie@example.com".to_string(), None).unwrap()
    }

    #[test]
    fn test_presence_rule_both_present() {
        let invitation = Invitation::new(Some(team()), Some(user()));
        assert!(check(&invitation).is_ok());
        assert!(is_well_formed(&invitation));
    }

    #[test]
    fn test_presence_rule_missing_team() {
        let invitation = Invitation::new(None, Some(user()));
        let err = check(&invitation).unwrap_err();
        assert_eq!(err, ValidationError::MissingTeam);
        assert!(err.missing_team());
        assert!(!err.missing_invitee());
    }

    #[test]
    fn test_presence_rule_missing_invitee() {
        let invitation = Invitation::new(Some(team()), None);
        let err = check(&invitation).unwrap_err();
        assert_eq!(err, ValidationError::MissingInvitee);
        assert!(!err.missing_team());
        assert!(err.missing_invitee());
    }

    #[test]
    fn test_presence_rule_missing_both() {
        let invitation = Invitation::new(None, None);
        let err = check(&invitation).unwrap_err();
        assert_eq!(err, ValidationError::MissingTeamAndInvitee);
        assert!(err.missing_team());
        assert!(err.missing_invitee());
    }

    #[test]
    fn test_check_is_repeatable_without_mutation() {
        let invitation = Invitation::new(None, Some(user()));
        assert_eq!(check(&invitation), check(&invitation));
        assert!(!invitation.is_persisted());
    }

    #[test]
    fn test_default_validator_is_presence_rule() {
        let validator = Validator::new();
        assert!(validator.is_valid(&Invitation::new(Some(team()), Some(user()))));
        assert!(!validator.is_valid(&Invitation::new(Some(team()), None)));
    }

    #[test]
    fn test_eligibility_check_rejects() {
        let validator = Validator::new().with_check(|_, invitee| !invitee.is_invited());

        let fresh = Invitation::new(Some(team()), Some(user()));
        assert!(validator.is_valid(&fresh));

        let mut already = user();
        already.mark_invited();
        let repeat = Invitation::new(Some(team()), Some(already));
        assert_eq!(
            validator.check(&repeat).unwrap_err(),
            ValidationError::Ineligible
        );
    }

    #[test]
    fn test_eligibility_runs_after_presence() {
        // Presence failure wins over eligibility failure
        let validator = Validator::new().with_check(|_, _| false);
        let invitation = Invitation::new(None, Some(user()));
        assert_eq!(
            validator.check(&invitation).unwrap_err(),
            ValidationError::MissingTeam
        );
    }

    #[test]
    fn test_multiple_checks_all_must_pass() {
        let validator = Validator::new()
            .with_check(|team, _| !team.name.is_empty())
            .with_check(|_, invitee| invitee.email.contains('@'));
        let invitation = Invitation::new(Some(team()), Some(user()));
        assert!(validator.is_valid(&invitation));
    }

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingTeam.to_string(),
            "invitation has no team"
        );
        assert_eq!(
            ValidationError::MissingTeamAndInvitee.to_string(),
            "invitation has no team and no invitee"
        );
    }
}
