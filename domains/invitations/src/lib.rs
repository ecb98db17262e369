//! Invitations domain: teams, users, invitation lifecycle and audit statements

pub mod domain;
pub mod store;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{
    InvitationEvent, InvitationGuardContext, InvitationState, InvitationStateMachine, StateError,
};
pub use domain::validation::{EligibilityCheck, ValidationError, Validator};

// Re-export store types
pub use store::{
    InMemoryStore, InvitationRecord, InvitationStore, PersistenceError, StoreConfig, StoreFactory,
};
