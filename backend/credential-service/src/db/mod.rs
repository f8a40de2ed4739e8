//! Credential store seam
//!
//! The service only needs lookup and atomic insert-if-absent by username.
//! `PgCredentialStore` backs production; `InMemoryCredentialStore` backs tests.

pub mod memory;
pub mod user_repo;

pub use memory::InMemoryCredentialStore;
pub use user_repo::PgCredentialStore;

use async_trait::async_trait;

use crate::models::Identity;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The username is already taken
    #[error("identity already exists")]
    Conflict,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create the backing schema if it does not exist. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, StoreError>;

    /// Insert a new identity. Must be atomic: of two concurrent inserts for
    /// the same username exactly one succeeds and the other gets `Conflict`.
    async fn insert(&self, identity: &Identity) -> Result<(), StoreError>;
}
