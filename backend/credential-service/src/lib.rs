// Credential Service Library

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod telemetry;
pub mod validators;

#[cfg(test)]
mod tests;

pub use error::{AuthError, Result};

use chrono::Duration;
use crypto_core::{JwtKeys, ACCESS_TOKEN_TTL_SECS};
use std::sync::Arc;

use db::CredentialStore;
use services::{Authenticator, Registrar, TokenVerifier};

/// Shared handler state. Built once at startup, read-only afterwards.
pub struct AppState {
    pub registrar: Registrar,
    pub authenticator: Authenticator,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, keys: Arc<JwtKeys>) -> Self {
        Self::with_ttl(store, keys, Duration::seconds(ACCESS_TOKEN_TTL_SECS))
    }

    pub fn with_ttl(store: Arc<dyn CredentialStore>, keys: Arc<JwtKeys>, ttl: Duration) -> Self {
        Self {
            registrar: Registrar::new(store.clone()),
            authenticator: Authenticator::new(store, keys.clone(), ttl),
            verifier: TokenVerifier::new(keys),
        }
    }
}
