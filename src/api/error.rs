// src/api/error.rs
// HTTP error envelope. Every failure carries a stable success flag and a
// human-readable message; internals go to the log and a debug detail field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::interview::TurnError;

#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self { message: message.into(), status_code: StatusCode::INTERNAL_SERVER_ERROR, detail: None }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { message: message.into(), status_code: StatusCode::BAD_REQUEST, detail: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { message: message.into(), status_code: StatusCode::NOT_FOUND, detail: None }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self { message: message.into(), status_code: StatusCode::CONFLICT, detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<TurnError> for ApiError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::MissingInput => ApiError::bad_request(err.to_string()),
            TurnError::SessionNotFound => ApiError::not_found(err.to_string()),
            TurnError::SessionNotActive(_) => ApiError::bad_request(err.to_string()),
            TurnError::InvalidTransition(e) => ApiError::conflict(e.to_string()),
            TurnError::StaleSession => ApiError::conflict(err.to_string()),
            TurnError::Internal(e) => {
                error!("Turn failed: {e:#}");
                ApiError::internal("Something went wrong while processing the request.")
                    .with_detail(format!("{e:#}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": false,
            "error": self.message,
        });
        if let Some(detail) = self.detail {
            body["details"] = json!(detail);
        }
        (self.status_code, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
