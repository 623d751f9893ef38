use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::JournalState;

/// `GET /health`: `ok` when the database answers, 503 otherwise.
pub async fn health(State(repo): State<JournalState>) -> impl IntoResponse {
    let (status, body) = match repo.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(err) => {
            tracing::warn!("Health check failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    };

    Response::builder()
        .status(status)
        .header(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .body(Body::from(body))
        .expect("health response should be valid")
}
