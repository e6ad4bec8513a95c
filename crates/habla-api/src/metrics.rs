//! Prometheus metrics for request traffic, scoring, the word cache and the
//! tutor relay.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use habla_score::FeedbackTier;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::error::ApiError;

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, ApiError> {
    let handle = PrometheusBuilder::new()
        // Request duration buckets, in seconds; tutor calls land in the upper ones
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware to record HTTP request count and duration
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = path_label(&req);

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Label for requests that matched no route (static files, unknown paths)
const UNMATCHED_PATH: &str = "/{*static}";

/// The route template a request matched, so label cardinality stays bounded
fn path_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_PATH, MatchedPath::as_str)
        .to_string()
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record a scored translation
pub fn record_translation_check(tier: FeedbackTier) {
    counter!("translation_checks_total", "tier" => tier.as_str()).increment(1);
}

/// Record a word cache lookup
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("word_cache_lookups_total", "result" => result).increment(1);
}

/// Record a word cache store
pub fn record_cache_store() {
    counter!("word_cache_stores_total").increment(1);
}

/// Record a tutor relay outcome (`success` or a failure kind)
pub fn record_tutor_request(status: &'static str) {
    counter!("tutor_requests_total", "status" => status).increment(1);
}
