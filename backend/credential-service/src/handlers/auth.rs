/// Credential lifecycle handlers
use actix_middleware::Subject;
use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::error::Result;
use crate::models::{LoginRequest, RegisterRequest};
use crate::AppState;

fn caller_addr(req: &HttpRequest) -> Option<String> {
    req.connection_info().realip_remote_addr().map(str::to_string)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let caller = caller_addr(&req);
    state
        .registrar
        .register(&payload.username, &payload.password, caller.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(json!({ "message": "User registered successfully" })))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let caller = caller_addr(&req);
    let token = state
        .authenticator
        .login(&payload.username, &payload.password, caller.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}

/// GET /verify
pub async fn verify(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let caller = caller_addr(&req);
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    state.verifier.verify(header, caller.as_deref())?;

    Ok(HttpResponse::Ok().json(json!({ "valid": true })))
}

/// GET /private, behind `JwtAuthMiddleware`
pub async fn private(subject: Subject) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Access granted",
        "subject": subject.0
    }))
}
