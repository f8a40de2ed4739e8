//! Cryptographic primitives shared by the credential service
//!
//! - `jwt`: HS256 access token signing and validation
//! - `bearer`: strict `Authorization` header tokenizer
//! - `secret`: signing secret strength classification

pub mod bearer;
pub mod jwt;
pub mod secret;

pub use bearer::{parse_authorization, BearerError, BEARER_SCHEME};
pub use jwt::{Claims, JwtError, JwtKeys, ACCESS_TOKEN_TTL_SECS};
pub use secret::{classify_secret, SecretStrength};
