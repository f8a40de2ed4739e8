/// Service-level tests for credential-service
///
/// Exercise Registrar, Authenticator and TokenVerifier directly against the
/// in-memory credential store.
pub mod fixtures;
pub mod unit_tests;
