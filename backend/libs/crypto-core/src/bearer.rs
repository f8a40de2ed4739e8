//! Strict `Authorization: Bearer <token>` parsing
//!
//! The header value is split on the first space. The scheme must be exactly
//! `Bearer` (case-sensitive) and the token must be non-empty with no
//! whitespace. Anything else is rejected.

/// Authorization scheme accepted by [`parse_authorization`]
pub const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    #[error("missing authorization header")]
    Missing,

    #[error("unsupported authorization scheme")]
    WrongScheme,

    #[error("empty bearer token")]
    EmptyToken,

    #[error("bearer token contains whitespace")]
    InvalidToken,
}

impl BearerError {
    pub fn reason(&self) -> &'static str {
        match self {
            BearerError::Missing => "missing_header",
            BearerError::WrongScheme => "wrong_scheme",
            BearerError::EmptyToken => "empty_token",
            BearerError::InvalidToken => "invalid_token_chars",
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// `None` means the header was absent (or not valid visible ASCII).
pub fn parse_authorization(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.ok_or(BearerError::Missing)?;

    let (scheme, token) = match header.split_once(' ') {
        Some(parts) => parts,
        None if header == BEARER_SCHEME => return Err(BearerError::EmptyToken),
        None => return Err(BearerError::WrongScheme),
    };

    if scheme != BEARER_SCHEME {
        return Err(BearerError::WrongScheme);
    }
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }
    if token.chars().any(char::is_whitespace) {
        return Err(BearerError::InvalidToken);
    }

    Ok(token)
}
