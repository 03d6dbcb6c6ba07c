use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use types::errors::TickError;

/// Central error type for the statistics API
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("Invalid tick: {0}")]
    InvalidTick(#[from] TickError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::MalformedBody(rejection) => {
                (StatusCode::BAD_REQUEST, rejection.body_text(), "BAD_REQUEST")
            }
            AppError::InvalidTick(err) => (StatusCode::BAD_REQUEST, err.to_string(), "INVALID_TICK"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
