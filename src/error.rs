use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::validation::{BatchError, ValidationError};
use crate::infrastructure::storage::StorageError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description, used both for whole-request errors and
/// for per-item failures inside batch responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Shortcode already exists")]
    DuplicateShortcode { code: String },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("This short URL has expired")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{message}")]
    BadRequest { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn link_not_found(code: &str) -> Self {
        Self::not_found("Short URL not found", json!({ "shortcode": code }))
    }

    pub fn duplicate(code: impl Into<String>) -> Self {
        Self::DuplicateShortcode { code: code.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::DuplicateShortcode { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::Storage(_) | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            AppError::Validation(err) => (
                "validation_error",
                json!({ "field": err.field, "reason": err.reason }),
            ),
            AppError::DuplicateShortcode { code } => {
                ("duplicate_shortcode", json!({ "shortcode": code }))
            }
            AppError::NotFound { details, .. } => ("not_found", details.clone()),
            AppError::Expired { code, expired_at } => (
                "expired",
                json!({ "shortcode": code, "expiredAt": expired_at }),
            ),
            // Storage internals are logged, not exposed.
            AppError::Storage(_) => ("storage_error", json!({})),
            AppError::BadRequest { details, .. } => ("bad_request", details.clone()),
            AppError::Internal { details, .. } => ("internal_error", details.clone()),
        };

        let message = match self {
            AppError::Storage(_) => "Storage unavailable".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        let details = match &err {
            BatchError::TooLarge { max, actual } => json!({ "max": max, "actual": actual }),
            BatchError::NotAList | BatchError::Empty => json!({}),
        };
        AppError::bad_request(err.to_string(), details)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request", json!(errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Storage(err) = &self {
            tracing::error!(error = %err, "Storage failure while handling request");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}
