/// Shared JWT module for the credential service
///
/// Tokens are signed with HS256 (HMAC with SHA-256) using a single symmetric
/// signing secret. The same `JwtKeys` value signs and verifies.
///
/// ## Security Design
///
/// - **HS256 ONLY**: validation pins the algorithm, `alg` in the header is never trusted
/// - **Explicit keys**: keys are built once at startup and handed to callers, no globals
/// - **Typed claims**: claims are decoded into `Claims` and checked before any field is read
/// - **Strict expiry**: a token is valid only while `exp > now`, with zero leeway
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::{JwtKeys, ACCESS_TOKEN_TTL_SECS};
///
/// let keys = JwtKeys::from_secret(b"a-long-random-signing-secret");
/// let (token, _claims) = keys
///     .issue("alice", chrono::Duration::seconds(ACCESS_TOKEN_TTL_SECS))
///     .expect("sign");
/// let claims = keys.validate(&token).expect("valid");
/// assert_eq!(claims.sub, "alice");
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Lifetime of an access token, in seconds (1 hour)
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims carried by an access token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for `subject` issued at `issued_at` and living for `ttl`
    pub fn new(subject: &str, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }
}

/// Why a token could not be signed or validated.
///
/// Callers must not surface the variant to clients: expired and forged tokens
/// are reported identically on the wire. The variant exists for audit logs.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum JwtError {
    #[error("token expired")]
    Expired,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("malformed token")]
    Malformed,

    #[error("failed to sign token")]
    Signing,
}

impl JwtError {
    /// Short label used in logs and metric labels
    pub fn reason(&self) -> &'static str {
        match self {
            JwtError::Expired => "expired",
            JwtError::BadSignature => "bad_signature",
            JwtError::Malformed => "malformed",
            JwtError::Signing => "signing_failed",
        }
    }
}

// ============================================================================
// Key Material
// ============================================================================

/// Signing and verification keys derived from the process signing secret.
///
/// Built once at startup and shared read-only (wrap in `Arc` or `web::Data`).
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("algorithm", &JWT_ALGORITHM)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtKeys {
    /// Derive HS256 keys from raw secret bytes.
    ///
    /// An empty secret is accepted; strength is checked separately with
    /// [`crate::secret::classify_secret`] so the service can warn at startup.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub"]);
        // Expiry is enforced in `validate_at` so the boundary is exact.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign an arbitrary set of claims
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(JWT_ALGORITHM), claims, &self.encoding).map_err(|_| JwtError::Signing)
    }

    /// Mint a token for `subject` issued now and expiring after `ttl`
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<(String, Claims), JwtError> {
        let claims = Claims::new(subject, Utc::now().timestamp(), ttl);
        let token = self.sign(&claims)?;
        Ok((token, claims))
    }

    /// Validate a token against the current time
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate signature and structure, then require `exp > now`.
    ///
    /// ## Errors
    ///
    /// - `BadSignature` if the MAC does not match or the algorithm differs
    /// - `Expired` if `exp <= now`
    /// - `Malformed` for anything that does not decode into `Claims`
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::BadSignature
                }
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed,
            }
        })?;

        if data.claims.exp <= now {
            return Err(JwtError::Expired);
        }

        Ok(data.claims)
    }
}

// ============================================================================
// Tests
// ============================================================================
