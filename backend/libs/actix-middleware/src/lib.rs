//! # Actix Middleware Library
//!
//! Middleware components for the credential service's Actix server
//!
//! ## Modules
//! - `jwt_auth`: bearer token authentication middleware and `Subject` extractor
//! - `metrics`: Prometheus request metrics middleware
//! - `logging`: tracing-based request logging middleware

pub mod jwt_auth;
pub mod logging;
pub mod metrics;

pub use jwt_auth::{JwtAuthMiddleware, Subject};
pub use logging::Logging;
pub use metrics::MetricsMiddleware;
