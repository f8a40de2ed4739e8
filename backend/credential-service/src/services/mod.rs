/// Credential lifecycle services
pub mod audit;
pub mod authenticator;
pub mod registrar;
pub mod token_verifier;

pub use audit::{AuditEvent, Outcome};
pub use authenticator::Authenticator;
pub use registrar::Registrar;
pub use token_verifier::TokenVerifier;
