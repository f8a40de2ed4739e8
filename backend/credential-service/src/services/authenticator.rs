use chrono::Duration;
use crypto_core::JwtKeys;
use std::sync::Arc;

use crate::db::CredentialStore;
use crate::error::{AuthError, Result};
use crate::metrics;
use crate::security::password::{verify_dummy_async, verify_password_async};
use crate::services::AuditEvent;
use crate::validators::has_control_chars;

/// Verifies credentials and mints access tokens.
///
/// An unknown username and a wrong password produce the same error and the
/// same amount of hashing work.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    keys: Arc<JwtKeys>,
    ttl: Duration,
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, keys: Arc<JwtKeys>, ttl: Duration) -> Self {
        Self { store, keys, ttl }
    }

    /// Returns a signed token for `username` on success.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        caller: Option<&str>,
    ) -> Result<String> {
        match self.authenticate(username, password).await {
            Ok(token) => {
                metrics::record_login("success");
                AuditEvent::success("login", username, caller).emit();
                Ok(token)
            }
            Err((err, reason)) => {
                // Public counter stays coarse; the reason goes to audit only
                let outcome = match err {
                    AuthError::InvalidCredentials => "invalid_credentials",
                    _ => "error",
                };
                metrics::record_login(outcome);
                let subject = (!username.is_empty()).then_some(username);
                AuditEvent::failure("login", subject, caller, reason).emit();
                Err(err)
            }
        }
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<String, (AuthError, &'static str)> {
        if username.is_empty() || password.is_empty() {
            verify_dummy_async(password.to_string()).await;
            return Err((AuthError::InvalidCredentials, "missing_field"));
        }
        // Could never have been registered
        if has_control_chars(username) {
            verify_dummy_async(password.to_string()).await;
            return Err((AuthError::InvalidCredentials, "unknown_user"));
        }

        let identity = self.store.find_by_username(username).await.map_err(|e| {
            tracing::error!(error = %e, "credential lookup failed");
            (AuthError::from(e), "store_unavailable")
        })?;

        let Some(identity) = identity else {
            verify_dummy_async(password.to_string()).await;
            return Err((AuthError::InvalidCredentials, "unknown_user"));
        };

        match verify_password_async(password.to_string(), identity.password_hash).await {
            Ok(true) => {}
            Ok(false) => return Err((AuthError::InvalidCredentials, "wrong_password")),
            Err(e) => {
                tracing::error!(username = %username, error = %e, "stored password hash unusable");
                return Err((AuthError::InvalidCredentials, "corrupt_hash"));
            }
        }

        let (token, _claims) = self.keys.issue(username, self.ttl).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            (AuthError::Internal(e.to_string()), e.reason())
        })?;

        Ok(token)
    }
}
