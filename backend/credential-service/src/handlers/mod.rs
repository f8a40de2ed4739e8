/// HTTP request handlers
pub mod auth;
pub mod health;

pub use auth::{login, private, register, verify};
pub use health::{index, livez, readyz};
