//! Domain entities for the Teamline invitations domain
//!
//! `Team` and `User` are collaborator entities: this domain reads
//! `team.name` and `user.email` and flips `user.invited` as part of a
//! successful save. `Invitation` owns the lifecycle: validation, the
//! transactional save, and the derived audit statement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teamline_common::{Error, Result};
use validator::ValidateEmail;

use crate::domain::audit;
use crate::domain::state::{
    InvitationEvent, InvitationGuardContext, InvitationState, InvitationStateMachine, StateError,
};
use crate::domain::validation::{self, ValidationError, Validator};
use crate::store::{InvitationRecord, InvitationStore, PersistenceError};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Set to true exactly when an invitation naming this user is persisted
    pub invited: bool,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation
    pub fn new(email: String, name: Option<String>) -> Result<Self> {
        // Validate email format (validator crate enforces RFC 5321 including length)
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if let Some(ref name) = name {
            if name.is_empty() || name.len() > 100 {
                return Err(Error::Validation(
                    "Name must be 1-100 characters".to_string(),
                ));
            }
        }

        Ok(User {
            id: Uuid::new_v4(),
            email,
            name,
            invited: false,
            team_id: None,
            created_at: Utc::now(),
        })
    }

    /// Mark the user as invited
    pub fn mark_invited(&mut self) {
        self.invited = true;
    }

    /// Check whether the user has been invited
    pub fn is_invited(&self) -> bool {
        self.invited
    }

    /// Record the user's team membership
    pub fn join_team(&mut self, team_id: Uuid) {
        self.team_id = Some(team_id);
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if !self.email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if let Some(ref name) = self.name {
            if name.is_empty() || name.len() > 100 {
                return Err(Error::Validation(
                    "Name must be 1-100 characters".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// Durable owner reference; assigned after creation
    pub owner: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with validation
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }

        Ok(Team {
            id: Uuid::new_v4(),
            name,
            owner: None,
            created_at: Utc::now(),
        })
    }

    /// Record the team's owner
    pub fn assign_owner(&mut self, owner: Uuid) {
        self.owner = Some(owner);
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors the save operation can return
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("invitation is already persisted")]
    AlreadyPersisted,
}

impl From<SaveError> for Error {
    fn from(err: SaveError) -> Self {
        match err {
            SaveError::Validation(e) => Error::Validation(e.to_string()),
            SaveError::Persistence(e) => Error::Persistence(e.to_string()),
            SaveError::AlreadyPersisted => {
                Error::Conflict("invitation is already persisted".to_string())
            }
        }
    }
}

/// Invitation entity - proposal that a specific user join a specific team.
///
/// References may be absent until save time; validity is recomputed from the
/// current references on every query and never cached. The references and
/// the persistence flag are private so the only way to reach the persisted
/// state is through [`Invitation::save`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    team: Option<Team>,
    invitee: Option<User>,
    persisted: bool,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Create an in-memory invitation; either reference may be absent.
    ///
    /// Construction never fails: validation is deferred to save time so an
    /// incomplete invitation can be inspected and audited before being
    /// corrected.
    pub fn new(team: Option<Team>, invitee: Option<User>) -> Self {
        Invitation {
            id: Uuid::new_v4(),
            team,
            invitee,
            persisted: false,
            created_at: Utc::now(),
        }
    }

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn invitee(&self) -> Option<&User> {
        self.invitee.as_ref()
    }

    /// Check whether the invitation has been durably stored
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Replace the team reference; rejected once persisted
    pub fn set_team(&mut self, team: Option<Team>) -> std::result::Result<(), SaveError> {
        if self.persisted {
            return Err(SaveError::AlreadyPersisted);
        }
        self.team = team;
        Ok(())
    }

    /// Replace the invitee reference; rejected once persisted
    pub fn set_invitee(&mut self, invitee: Option<User>) -> std::result::Result<(), SaveError> {
        if self.persisted {
            return Err(SaveError::AlreadyPersisted);
        }
        self.invitee = invitee;
        Ok(())
    }

    /// Check the core presence rule against the current references
    pub fn is_valid(&self) -> bool {
        validation::is_well_formed(self)
    }

    /// Validate the core presence rule, reporting what is missing
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validation::check(self)
    }

    /// Get current invitation state
    pub fn state(&self) -> InvitationState {
        match (self.is_valid(), self.persisted) {
            (_, true) => InvitationState::Completed,
            (true, false) => InvitationState::Pending,
            (false, false) => InvitationState::Invalid,
        }
    }

    /// Derive the audit statement for the invitation's current state.
    ///
    /// Callable at any lifecycle point; never fails and never requires the
    /// record to be persisted.
    pub fn event_log_statement(&self) -> String {
        audit::event_log_statement(self)
    }

    /// Persist the invitation with the default (presence-only) validator
    pub async fn save(
        &mut self,
        store: &dyn InvitationStore,
    ) -> std::result::Result<(), SaveError> {
        self.save_with(store, &Validator::default()).await
    }

    /// Persist the invitation.
    ///
    /// Validation runs first; a failure never reaches the store and leaves
    /// the invitee untouched. On the success path the invitee update and the
    /// invitation write are committed to the store as one atomic unit, and
    /// the in-memory entity is only mutated after the commit returns `Ok`,
    /// so a store failure rolls back to the pre-save state.
    pub async fn save_with(
        &mut self,
        store: &dyn InvitationStore,
        validator: &Validator,
    ) -> std::result::Result<(), SaveError> {
        let context = InvitationGuardContext {
            is_valid: validator.is_valid(self),
        };
        if let Err(err) =
            InvitationStateMachine::transition(self.state(), InvitationEvent::Persist, Some(&context))
        {
            return Err(match err {
                StateError::TerminalState(_) => SaveError::AlreadyPersisted,
                _ => {
                    let validation = validator
                        .check(self)
                        .err()
                        .unwrap_or(ValidationError::Ineligible);
                    tracing::debug!(
                        invitation = %self.id,
                        error = %validation,
                        "save rejected by validation"
                    );
                    SaveError::Validation(validation)
                }
            });
        }

        let (Some(team), Some(invitee)) = (self.team.as_ref(), self.invitee.as_ref()) else {
            return Err(SaveError::Validation(ValidationError::MissingTeamAndInvitee));
        };
        let team_id = team.id;

        // The committed invitee already carries the invited flag, so the
        // store writes both updates in one unit.
        let mut invited = invitee.clone();
        invited.mark_invited();

        let record = InvitationRecord {
            id: self.id,
            team_id,
            invitee_id: invited.id,
            created_at: self.created_at,
        };
        store.commit(record, invited.clone()).await?;

        // Durable write succeeded; mirror it in memory, invitee first.
        self.invitee = Some(invited);
        self.persisted = true;

        tracing::info!(invitation = %self.id, team = %team_id, "invitation persisted");
        Ok(())
    }
}
