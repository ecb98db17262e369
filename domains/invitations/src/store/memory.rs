//! In-memory invitation store
//!
//! Thread-safe via a single `Arc<Mutex<_>>` over both tables, which is what
//! makes the commit atomic: the invitation row and the invitee row are
//! inserted under one critical section, and a rejected commit inserts
//! neither. A writable flag turns the store read-only for maintenance
//! windows; commits fail without applying anything.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::domain::entities::User;
use crate::store::{InvitationRecord, InvitationStore, PersistenceError};

#[derive(Debug, Default)]
struct Tables {
    invitations: HashMap<Uuid, InvitationRecord>,
    users: HashMap<Uuid, User>,
}

/// In-memory store backend
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    writable: Arc<AtomicBool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create a new writable in-memory store
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            writable: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle whether commits are accepted
    pub fn set_writable(&self, writable: bool) {
        self.writable.store(writable, Ordering::SeqCst);
    }

    /// Check whether commits are accepted
    pub fn is_writable(&self) -> bool {
        self.writable.load(Ordering::SeqCst)
    }

    /// Number of stored invitations
    pub fn invitation_count(&self) -> usize {
        self.lock_tables().invitations.len()
    }

    /// Number of stored users
    pub fn user_count(&self) -> usize {
        self.lock_tables().users.len()
    }

    /// Drop every stored row
    pub fn clear(&self) {
        let mut tables = self.lock_tables();
        tables.invitations.clear();
        tables.users.clear();
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .expect("tables lock poisoned — prior test panicked")
    }
}

#[async_trait::async_trait]
impl InvitationStore for InMemoryStore {
    async fn commit(
        &self,
        record: InvitationRecord,
        invitee: User,
    ) -> Result<(), PersistenceError> {
        if !self.is_writable() {
            tracing::warn!(invitation = %record.id, "commit rejected: store is read-only");
            return Err(PersistenceError::ReadOnly);
        }

        let mut tables = self
            .tables
            .lock()
            .map_err(|e| PersistenceError::Unavailable(format!("tables lock poisoned: {e}")))?;

        if tables.invitations.contains_key(&record.id) {
            return Err(PersistenceError::Duplicate(record.id));
        }

        tracing::debug!(invitation = %record.id, invitee = %invitee.id, "committing invitation");
        tables.users.insert(invitee.id, invitee);
        tables.invitations.insert(record.id, record);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<InvitationRecord>, PersistenceError> {
        Ok(self.lock_tables().invitations.get(&id).cloned())
    }

    async fn find_by_team(&self, team_id: Uuid) -> Result<Vec<InvitationRecord>, PersistenceError> {
        let tables = self.lock_tables();
        let mut records: Vec<InvitationRecord> = tables
            .invitations
            .values()
            .filter(|record| record.team_id == team_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, PersistenceError> {
        Ok(self.lock_tables().users.get(&id).cloned())
    }
}
