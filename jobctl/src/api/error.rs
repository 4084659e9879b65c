//! API error handling.
//!
//! Provides consistent error responses for the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::Error;

/// API error response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApiErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API error type that can be converted to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a 400 Bad Request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Create a 404 Not Found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Create a 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }

    /// Create a 503 Service Unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::UnknownQueue(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "UNKNOWN_QUEUE", err.to_string())
            }
            Error::CommandNotSupported { .. } => ApiError::new(
                StatusCode::BAD_REQUEST,
                "COMMAND_NOT_SUPPORTED",
                err.to_string(),
            ),
            Error::EngineUnavailable { .. } => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "ENGINE_UNAVAILABLE",
                err.to_string(),
            ),
            Error::StatisticsUnavailable { .. } => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "STATISTICS_UNAVAILABLE",
                err.to_string(),
            ),
            Error::Database(e) => {
                tracing::error!("Database error: {}", e);
                ApiError::internal("Database error occurred")
            }
            Error::Configuration(msg) => ApiError::bad_request(msg.clone()),
            _ => {
                tracing::error!("Unexpected error: {}", err);
                ApiError::internal("An unexpected error occurred")
            }
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use engine_api::{EngineError, QueueName};

    use crate::queue::QueueCommand;

    use super::*;

    #[test]
    fn test_unknown_queue_maps_to_404() {
        let api_err: ApiError = Error::unknown_queue("not-a-real-queue").into();
        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
        assert!(api_err.message.contains("not-a-real-queue"));
    }

    #[test]
    fn test_command_not_supported_names_queue_and_violation() {
        let api_err: ApiError = Error::CommandNotSupported {
            queue: QueueName::BackgroundTask,
            command: QueueCommand::ClearFailed,
            reason: "queue is read-only",
        }
        .into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert!(api_err.message.contains("backgroundTask"));
        assert!(api_err.message.contains("clear-failed"));
        assert!(api_err.message.contains("read-only"));
    }

    #[test]
    fn test_engine_unavailable_maps_to_503() {
        let api_err: ApiError = Error::EngineUnavailable {
            queue: QueueName::Search,
            operation: "start dispatch",
            source: EngineError::unavailable(QueueName::Search, "down"),
        }
        .into();
        assert_eq!(api_err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(api_err.code, "ENGINE_UNAVAILABLE");
    }
}
