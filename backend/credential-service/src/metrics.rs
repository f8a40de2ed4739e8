use actix_web::{HttpResponse, Responder};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

static REGISTER_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "register_requests_total",
        "Registration attempts by outcome",
        &["outcome"]
    )
    .expect("register_requests_total registration should succeed")
});

static LOGIN_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "login_requests_total",
        "Login attempts by outcome",
        &["outcome"]
    )
    .expect("login_requests_total registration should succeed")
});

static TOKEN_VERIFICATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "token_verifications_total",
        "Token verifications by outcome",
        &["outcome"]
    )
    .expect("token_verifications_total registration should succeed")
});

pub fn record_register(outcome: &str) {
    REGISTER_REQUESTS.with_label_values(&[outcome]).inc();
}

pub fn record_login(outcome: &str) {
    LOGIN_REQUESTS.with_label_values(&[outcome]).inc();
}

pub fn record_verification(outcome: &str) {
    TOKEN_VERIFICATIONS.with_label_values(&[outcome]).inc();
}

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}
