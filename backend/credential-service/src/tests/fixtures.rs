/// Test fixtures and helpers for credential-service tests
use chrono::Duration;
use crypto_core::{JwtKeys, ACCESS_TOKEN_TTL_SECS};
use std::sync::Arc;

use crate::db::InMemoryCredentialStore;
use crate::services::{Authenticator, Registrar, TokenVerifier};

pub const TEST_SECRET: &[u8] = b"unit-test-signing-secret-Xk9#mQ2vLp7$wR4n";
pub const TEST_USERNAME: &str = "testuser";
pub const TEST_PASSWORD: &str = "SecurePass123!";
pub const TEST_CALLER: &str = "127.0.0.1";

/// The three services wired to one shared in-memory store
pub struct Harness {
    pub store: Arc<InMemoryCredentialStore>,
    pub keys: Arc<JwtKeys>,
    pub registrar: Registrar,
    pub authenticator: Authenticator,
    pub verifier: TokenVerifier,
}

pub fn harness() -> Harness {
    let store = Arc::new(InMemoryCredentialStore::new());
    let keys = Arc::new(JwtKeys::from_secret(TEST_SECRET));

    Harness {
        registrar: Registrar::new(store.clone()),
        authenticator: Authenticator::new(
            store.clone(),
            keys.clone(),
            Duration::seconds(ACCESS_TOKEN_TTL_SECS),
        ),
        verifier: TokenVerifier::new(keys.clone()),
        store,
        keys,
    }
}

/// Harness with `TEST_USERNAME` already registered
pub async fn harness_with_user() -> Harness {
    let h = harness();
    h.registrar
        .register(TEST_USERNAME, TEST_PASSWORD, Some(TEST_CALLER))
        .await
        .expect("fixture registration should succeed");
    h
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
