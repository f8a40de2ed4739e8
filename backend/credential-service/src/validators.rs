/// Request field validation
use crate::error::{AuthError, Result};

/// Matches the `VARCHAR(50)` username column
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Validate a registration credential. Runs before the store is touched.
pub fn validate_credential(username: &str, password: &str) -> Result<()> {
    if username.is_empty() {
        return Err(AuthError::InvalidInput("Username is required"));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("Password is required"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AuthError::InvalidInput("Username is too long"));
    }
    if has_control_chars(username) {
        return Err(AuthError::InvalidInput("Username contains invalid characters"));
    }
    Ok(())
}

/// PostgreSQL text columns reject NUL, so control characters never reach the store
pub fn has_control_chars(value: &str) -> bool {
    value.chars().any(char::is_control)
}
