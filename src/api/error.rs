//! Unified API error handling
//!
//! Error bodies are `{"error": <summary>, "details": <message>}`; `details` is
//! omitted for validation failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error summary
    pub error: String,
    /// Underlying failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("{0}")]
    BadRequest(String),

    /// Brief could not be saved (500)
    #[error("Failed to save brief to database")]
    Database(String),

    /// Briefs could not be read (500)
    #[error("Failed to load briefs")]
    Query(String),

    /// Internal server error (500)
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    fn details(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest(_) => None,
            ApiError::Database(details) | ApiError::Query(details) | ApiError::Internal(details) => {
                Some(details.as_str())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Query(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                message = %self,
                details = self.details().unwrap_or_default(),
                "API error"
            );
        } else {
            tracing::warn!(status = status.as_u16(), message = %self, "Rejected request");
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            details: self.details().map(str::to_string),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<crate::service::BriefServiceError> for ApiError {
    fn from(err: crate::service::BriefServiceError) -> Self {
        match err {
            crate::service::BriefServiceError::InvalidRequest(e) => {
                ApiError::BadRequest(e.to_string())
            }
            crate::service::BriefServiceError::DbError(crate::db::DbError::Sqlx(e)) => {
                ApiError::Database(e.to_string())
            }
        }
    }
}
