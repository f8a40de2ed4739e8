//! Request metrics middleware
//!
//! Records `http_requests_total` and `http_request_duration_seconds` keyed by
//! method, route pattern and status code.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use prometheus::{HistogramVec, IntCounterVec};
use std::time::Instant;

/// Path that serves the metrics themselves; never recorded
const METRICS_PATH: &str = "/metrics";

/// Label for requests that matched no route (404 scans, typos)
const UNMATCHED_ROUTE: &str = "unmatched";

/// Argon2 login dominates latency, so buckets reach well past a second
const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0];

lazy_static::lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = prometheus::register_int_counter_vec!(
        "http_requests_total",
        "HTTP requests by method, route and status",
        &["method", "path", "status"]
    )
    .expect("http_requests_total registration should succeed at startup");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec =
        prometheus::register_histogram_vec!(
            "http_request_duration_seconds",
            "HTTP request latency by method, route and status",
            &["method", "path", "status"],
            LATENCY_BUCKETS.to_vec()
        )
        .expect("http_request_duration_seconds registration should succeed at startup");
}

/// Route label for a request. Raw paths would make label cardinality
/// attacker-controlled, so only matched patterns are used.
fn route_label(req: &ServiceRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Labels captured before the request is handed to the inner service
struct RequestSample {
    method: String,
    route: String,
    started: Instant,
}

impl RequestSample {
    fn begin(req: &ServiceRequest) -> Option<Self> {
        if req.path() == METRICS_PATH {
            return None;
        }
        Some(Self {
            method: req.method().to_string(),
            route: route_label(req),
            started: Instant::now(),
        })
    }

    fn finish(self, status: StatusCode) {
        let status = status.as_u16().to_string();
        let labels = [self.method.as_str(), self.route.as_str(), status.as_str()];

        HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();
        HTTP_REQUEST_DURATION_SECONDS
            .with_label_values(&labels)
            .observe(self.started.elapsed().as_secs_f64());
    }
}

/// Prometheus request metrics middleware
pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MetricsMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService { service }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let sample = RequestSample::begin(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            if let Some(sample) = sample {
                sample.finish(res.status());
            }
            Ok(res)
        })
    }
}
