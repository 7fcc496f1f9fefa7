use axum::http::StatusCode;

/// Liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe. Answers 200 once the router is serving.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
