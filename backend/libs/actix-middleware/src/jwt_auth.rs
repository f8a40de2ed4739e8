use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, HttpResponse,
};
use crypto_core::{parse_authorization, JwtKeys};
use futures::future::{ready, Ready};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

/// Message returned for every rejected bearer token, whatever the cause
pub const UNAUTHORIZED_MESSAGE: &str = "Invalid or expired token";

/// Subject (username) extracted from a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(pub String);

/// Bearer token authentication middleware.
///
/// Requires `web::Data<JwtKeys>` in app data. On success the token's subject
/// is inserted into request extensions as [`Subject`].
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match authenticate(&req) {
                Ok(subject) => {
                    req.extensions_mut().insert(subject);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(response) => Ok(req.into_response(response).map_into_right_body()),
            }
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Subject, HttpResponse> {
    let keys = req.app_data::<web::Data<JwtKeys>>().ok_or_else(|| {
        tracing::error!("JwtKeys missing from app data");
        HttpResponse::InternalServerError()
            .json(json!({ "error": "Internal server error", "status": 500 }))
    })?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = parse_authorization(header).map_err(|e| {
        tracing::warn!(
            target: "audit",
            path = %req.path(),
            reason = e.reason(),
            "bearer authentication rejected"
        );
        unauthorized_response()
    })?;

    let claims = keys.validate(token).map_err(|e| {
        tracing::warn!(
            target: "audit",
            path = %req.path(),
            reason = e.reason(),
            "bearer authentication rejected"
        );
        unauthorized_response()
    })?;

    Ok(Subject(claims.sub))
}

fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "error": UNAUTHORIZED_MESSAGE, "status": 401 }))
}

/// FromRequest implementation for Subject
impl actix_web::FromRequest for Subject {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<Subject>() {
            Some(subject) => ready(Ok(subject.clone())),
            None => ready(Err(InternalError::from_response(
                UNAUTHORIZED_MESSAGE,
                unauthorized_response(),
            )
            .into())),
        }
    }
}
