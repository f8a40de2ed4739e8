use std::sync::Arc;

use crate::db::CredentialStore;
use crate::error::{AuthError, Result};
use crate::metrics;
use crate::models::Identity;
use crate::security::password::hash_password_async;
use crate::services::AuditEvent;
use crate::validators::validate_credential;

/// Creates identities. Never issues tokens.
pub struct Registrar {
    store: Arc<dyn CredentialStore>,
}

impl Registrar {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Register a new identity.
    ///
    /// Input is validated before the store is contacted. Uniqueness is left
    /// to the store's atomic insert.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        caller: Option<&str>,
    ) -> Result<()> {
        let result = self.create_identity(username, password).await;

        match &result {
            Ok(()) => {
                metrics::record_register("created");
                AuditEvent::success("register", username, caller).emit();
            }
            Err(err) => {
                let reason = match err {
                    AuthError::InvalidInput(_) => "invalid_input",
                    AuthError::Conflict => "conflict",
                    AuthError::StoreUnavailable(_) => "store_unavailable",
                    _ => "internal",
                };
                if matches!(err, AuthError::StoreUnavailable(_) | AuthError::Internal(_)) {
                    tracing::error!(error = %err, "registration failed");
                }
                metrics::record_register(reason);
                let subject = (!username.is_empty()).then_some(username);
                AuditEvent::failure("register", subject, caller, reason).emit();
            }
        }

        result
    }

    async fn create_identity(&self, username: &str, password: &str) -> Result<()> {
        validate_credential(username, password)?;

        self.store.ensure_schema().await?;

        let password_hash = hash_password_async(password.to_string()).await?;
        let identity = Identity {
            username: username.to_string(),
            password_hash,
        };

        self.store.insert(&identity).await?;
        Ok(())
    }
}
