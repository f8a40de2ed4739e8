use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// Service info
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "credential-service",
        "message": "Credential service is running"
    }))
}

/// Readiness probe (`/healthz`)
pub async fn readyz() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Liveness probe (`/livez`)
pub async fn livez() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
