use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("Data fetch failed: {0}")]
    Fetch(String),

    #[error("Failed to parse data: {0}")]
    Parse(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<csv::Error> for ChartError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl IntoResponse for ChartError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Fetch(msg) => {
                tracing::error!("Data fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, format!("Data fetch failed: {msg}"))
            }
            Self::Parse(msg) => {
                tracing::error!("Data parse error: {msg}");
                (StatusCode::BAD_GATEWAY, format!("Malformed data: {msg}"))
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
