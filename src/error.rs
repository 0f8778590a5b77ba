// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Every way a relay request can fail. The `Display` text is what the
/// caller sees; upstream detail is logged where it is detected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Method not allowed.")]
    InvalidMethod,

    #[error("Please provide a message.")]
    InvalidInput,

    #[error("AI service is not configured yet.")]
    Unconfigured,

    #[error("AI service returned an error. Please try again.")]
    UpstreamError,

    #[error("No response from AI. Please try again.")]
    UpstreamEmpty,

    #[error("Internal server error. Please try again.")]
    Transport,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::Unconfigured | AppError::Transport => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamError | AppError::UpstreamEmpty => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
