/// Identity model
use serde::Deserialize;
use sqlx::FromRow;
use std::fmt;

/// Stored identity: a unique username and the Argon2 PHC hash of its password
#[derive(Clone, FromRow)]
pub struct Identity {
    pub username: String,
    pub password_hash: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

// Missing fields deserialize as empty strings so they go through the same
// validation as explicitly empty ones.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
