use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{CredentialStore, StoreError};
use crate::models::Identity;

/// Process-local credential store.
///
/// Used by tests and local runs without PostgreSQL. Can be switched into an
/// unavailable state to exercise store failure paths.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: DashMap<String, String>,
    unavailable: AtomicBool,
    inserts: AtomicUsize,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful inserts
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError> {
        self.check_available()?;

        Ok(self.users.get(username).map(|entry| Identity {
            username: entry.key().clone(),
            password_hash: entry.value().clone(),
        }))
    }

    async fn insert(&self, identity: &Identity) -> Result<(), StoreError> {
        self.check_available()?;

        // Entry holds the shard lock, so check-and-insert is atomic
        match self.users.entry(identity.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(identity.password_hash.clone());
                self.inserts.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}
