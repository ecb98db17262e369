//! Durable store seam for the invitations domain
//!
//! The domain never talks to a database directly: it hands the store one
//! commit containing the invitation record and the updated invitee, and the
//! store guarantees that either both are durable or neither is. Backends
//! implement [`InvitationStore`]; the in-memory backend lives in
//! [`memory`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::User;

pub mod memory;

pub use memory::InMemoryStore;

/// Errors the durable store can surface
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("store is in read-only mode")]
    ReadOnly,

    #[error("invitation {0} is already stored")]
    Duplicate(Uuid),

    #[error("store configuration error: {0}")]
    Configuration(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<PersistenceError> for teamline_common::Error {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Duplicate(_) => teamline_common::Error::Conflict(err.to_string()),
            PersistenceError::ReadOnly
            | PersistenceError::Configuration(_)
            | PersistenceError::Unavailable(_) => {
                teamline_common::Error::Persistence(err.to_string())
            }
        }
    }
}

/// Storage snapshot of an invitation.
///
/// Built only from a validated invitation, so a stored record always names
/// both parties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationRecord {
    pub id: Uuid,
    pub team_id: Uuid,
    pub invitee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Durable store contract for invitations
#[async_trait::async_trait]
pub trait InvitationStore: Send + Sync {
    /// Commit the invitation record and the updated invitee as one atomic
    /// unit: either both become durable or neither does.
    async fn commit(
        &self,
        record: InvitationRecord,
        invitee: User,
    ) -> Result<(), PersistenceError>;

    /// Find a stored invitation by id
    async fn get(&self, id: Uuid) -> Result<Option<InvitationRecord>, PersistenceError>;

    /// Find all stored invitations for a team
    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<InvitationRecord>, PersistenceError>;

    /// Read back the durably stored invitee
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, PersistenceError>;
}

/// Store configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store provider (memory)
    pub provider: String,
    /// Reject commits while true (maintenance windows)
    pub read_only: bool,
}

impl StoreConfig {
    /// Create store config from environment variables
    pub fn from_env() -> Result<Self, PersistenceError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("INVITATION_STORE").unwrap_or_else(|_| "memory".to_string());

        let read_only = std::env::var("INVITATION_STORE_READ_ONLY")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .unwrap_or(false);

        Ok(Self {
            provider,
            read_only,
        })
    }
}

/// Store factory
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store based on configuration
    pub fn create(config: StoreConfig) -> Result<Box<dyn InvitationStore>, PersistenceError> {
        match config.provider.as_str() {
            "memory" => {
                tracing::info!(read_only = config.read_only, "Creating in-memory invitation store");
                let store = InMemoryStore::new();
                store.set_writable(!config.read_only);
                Ok(Box::new(store))
            }
            provider => Err(PersistenceError::Configuration(format!(
                "Unknown store provider: {}. Supported providers: memory",
                provider
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_store_config_defaults() {
        std::env::remove_var("INVITATION_STORE");
        std::env::remove_var("INVITATION_STORE_READ_ONLY");

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.provider, "memory");
        assert!(!config.read_only);
    }

    #[test]
    #[serial]
    fn test_store_config_reads_environment() {
        std::env::set_var("INVITATION_STORE", "memory");
        std::env::set_var("INVITATION_STORE_READ_ONLY", "true");

        let config = StoreConfig::from_env().unwrap();
        assert_eq!(config.provider, "memory");
        assert!(config.read_only);

        std::env::remove_var("INVITATION_STORE");
        std::env::remove_var("INVITATION_STORE_READ_ONLY");
    }

    #[test]
    #[serial]
    fn test_store_config_ignores_garbage_read_only_flag() {
        std::env::set_var("INVITATION_STORE_READ_ONLY", "definitely");

        let config = StoreConfig::from_env().unwrap();
        assert!(!config.read_only);

        std::env::remove_var("INVITATION_STORE_READ_ONLY");
    }

    #[test]
    fn test_factory_builds_memory_store() {
        let config = StoreConfig {
            provider: "memory".to_string(),
            read_only: false,
        };
        assert!(StoreFactory::create(config).is_ok());
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let config = StoreConfig {
            provider: "postgres".to_string(),
            read_only: false,
        };
        let err = StoreFactory::create(config).err().unwrap();
        assert!(matches!(err, PersistenceError::Configuration(_)));
    }

    #[test]
    fn test_persistence_error_into_common_error() {
        let err: teamline_common::Error = PersistenceError::ReadOnly.into();
        assert_eq!(err.error_code(), "PERSISTENCE_ERROR");

        let err: teamline_common::Error = PersistenceError::Duplicate(Uuid::new_v4()).into();
        assert_eq!(err.error_code(), "CONFLICT");
    }
}
