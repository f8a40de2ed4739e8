use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Identity already exists")]
    Conflict,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing or malformed token")]
    MalformedToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl AuthError {
    /// Message sent to the client. Stable across releases; never carries
    /// internal error text.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(msg) => *msg,
            AuthError::Conflict => "User already exists",
            AuthError::InvalidCredentials => "Invalid credentials",
            AuthError::MalformedToken => "Missing or malformed token",
            AuthError::InvalidToken => "Invalid or expired token",
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => "Internal server error",
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::InvalidCredentials | AuthError::MalformedToken | AuthError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::StoreUnavailable(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(json!({
            "error": self.public_message(),
            "status": status.as_u16()
        }))
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AuthError::Conflict,
            StoreError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
        }
    }
}
