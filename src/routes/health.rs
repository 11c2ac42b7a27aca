use axum::http::StatusCode;

/// Health check endpoint
///
/// Returns 200 OK if the service is running. Does not touch the data endpoint.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
