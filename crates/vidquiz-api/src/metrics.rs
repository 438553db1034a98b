//! Prometheus metrics for the API server.

use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and return its render handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vidquiz_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vidquiz_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vidquiz_http_requests_in_flight";

    // Pipeline metrics
    pub const TRANSCRIPTS_TOTAL: &str = "vidquiz_transcripts_total";
    pub const GENERATIONS_TOTAL: &str = "vidquiz_generations_total";
    pub const QUIZZES_PER_RESPONSE: &str = "vidquiz_quizzes_per_response";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "vidquiz_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", route_label(path).to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record where a transcript came from (`captions`, `fallback`, `missing`).
pub fn record_transcript_outcome(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::TRANSCRIPTS_TOTAL, &labels).increment(1);
}

/// Record a generation result (`ok`, `malformed`, `error`).
pub fn record_generation_outcome(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::GENERATIONS_TOTAL, &labels).increment(1);
}

/// Record the number of quiz items in a parsed model response.
pub fn record_quizzes_generated(count: usize) {
    histogram!(names::QUIZZES_PER_RESPONSE).record(count as f64);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Collapse unknown paths into one label so scanners cannot blow up cardinality.
fn route_label(path: &str) -> &str {
    match path {
        "/" | "/api/generate" | "/health" | "/healthz" | "/metrics" => path,
        _ => "other",
    }
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
