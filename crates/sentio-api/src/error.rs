//! HTTP error envelope.
//!
//! Validation and not-found errors carry their message through; anything
//! else is logged with full detail and surfaced generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::error;

pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>, request_id: Option<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: message.into(),
            request_id,
        }
    }

    pub fn from_core(err: sentio_core::Error, request_id: Option<String>) -> Self {
        let code = err.code();
        let (status, message) = match code {
            "VALIDATION_ERROR" => (StatusCode::BAD_REQUEST, err.to_string()),
            "NOT_FOUND" => (StatusCode::NOT_FOUND, "Job not found".to_string()),
            "CONFLICT" => (StatusCode::CONFLICT, err.to_string()),
            _ => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };
        Self {
            status,
            code,
            message,
            request_id,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
                "request_id": self.request_id,
                "timestamp": Utc::now(),
            }
        });
        (self.status, Json(body)).into_response()
    }
}
