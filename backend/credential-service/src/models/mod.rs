/// Data models for the credential service
pub mod user;

pub use user::{Identity, LoginRequest, RegisterRequest};
