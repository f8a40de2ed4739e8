/// Route table
use actix_middleware::JwtAuthMiddleware;
use actix_web::{error::InternalError, web};

use crate::error::AuthError;
use crate::handlers;
use crate::metrics::metrics_handler;

/// Malformed or non-JSON bodies become a 400 with the standard error shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected request body");
        let response = actix_web::ResponseError::error_response(&AuthError::InvalidInput(
            "Invalid request body",
        ));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(handlers::index))
        .route("/register", web::post().to(handlers::register))
        .route("/login", web::post().to(handlers::login))
        .route("/verify", web::get().to(handlers::verify))
        .service(
            web::resource("/private")
                .wrap(JwtAuthMiddleware)
                .route(web::get().to(handlers::private)),
        )
        .route("/healthz", web::get().to(handlers::readyz))
        .route("/livez", web::get().to(handlers::livez))
        .route("/metrics", web::get().to(metrics_handler));
}
