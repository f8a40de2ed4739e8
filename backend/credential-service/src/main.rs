/// Credential Service - Main entry point
use actix_middleware::{Logging, MetricsMiddleware};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use crypto_core::{classify_secret, JwtKeys, SecretStrength};
use db_pool::{create_pool, DbConfig};
use std::sync::Arc;

use credential_service::{
    config::Config, db::PgCredentialStore, routes, telemetry, AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let config = Config::from_env().context("Failed to load configuration from environment")?;
    tracing::info!(?config, "Starting credential service");

    match classify_secret(config.jwt_secret.as_bytes()) {
        SecretStrength::Empty => {
            tracing::warn!("JWT_SECRET is empty; tokens are signed with an empty key")
        }
        SecretStrength::Weak => tracing::warn!("JWT_SECRET is weak; use at least 32 random bytes"),
        strength => tracing::info!(?strength, "JWT secret loaded"),
    }
    let keys = Arc::new(JwtKeys::from_secret(config.jwt_secret.as_bytes()));

    let db_config = DbConfig::from_env("credential-service", &config.database_url);
    db_config.log_config();
    let pool = create_pool(db_config)
        .await
        .context("Failed to connect to the credential store")?;

    let store = Arc::new(PgCredentialStore::new(pool.clone()));
    let state = web::Data::new(AppState::new(store, keys.clone()));
    let keys = web::Data::from(keys);

    let (host, port) = config.bind_addr();
    tracing::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(keys.clone())
            .wrap(MetricsMiddleware)
            .wrap(Logging::new().exclude("/healthz").exclude("/livez"))
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("HTTP server stopped, closing database pool");
    pool.close().await;

    Ok(())
}
