use chrono::Utc;
use crypto_core::{parse_authorization, JwtKeys};
use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::metrics;
use crate::services::AuditEvent;

/// Validates bearer tokens presented in an `Authorization` header.
pub struct TokenVerifier {
    keys: Arc<JwtKeys>,
}

impl TokenVerifier {
    pub fn new(keys: Arc<JwtKeys>) -> Self {
        Self { keys }
    }

    /// Returns the token subject when the header carries a valid, unexpired token.
    pub fn verify(&self, header: Option<&str>, caller: Option<&str>) -> Result<String> {
        self.verify_at(header, caller, Utc::now().timestamp())
    }

    /// Same as [`verify`](Self::verify) with an explicit clock, in Unix seconds.
    pub fn verify_at(
        &self,
        header: Option<&str>,
        caller: Option<&str>,
        now: i64,
    ) -> Result<String> {
        let token = match parse_authorization(header) {
            Ok(token) => token,
            Err(e) => return Err(self.reject(AuthError::MalformedToken, e.reason(), caller)),
        };

        match self.keys.validate_at(token, now) {
            Ok(claims) => {
                metrics::record_verification("valid");
                AuditEvent::success("verify", &claims.sub, caller).emit();
                Ok(claims.sub)
            }
            // Expired and forged look the same to the caller
            Err(e) => Err(self.reject(AuthError::InvalidToken, e.reason(), caller)),
        }
    }

    fn reject(&self, err: AuthError, reason: &'static str, caller: Option<&str>) -> AuthError {
        let outcome = match err {
            AuthError::MalformedToken => "malformed",
            _ => "invalid",
        };
        metrics::record_verification(outcome);
        AuditEvent::failure("verify", None, caller, reason).emit();
        err
    }
}
