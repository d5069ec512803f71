//! Error taxonomy for the audit API
//!
//! Missing or invalid input maps to 400; everything else that escapes a
//! handler maps to 500 with the underlying message. Per-page navigation
//! failures never reach this layer; the crawler recovers from those
//! locally, and reaching the page cap is a normal terminal condition.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::browser::LaunchError;

/// Result type alias for audit handlers
pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Debug, Error)]
pub enum AuditError {
    /// Missing or malformed request field
    #[error("{0}")]
    InvalidInput(String),

    /// No browser backend available in this environment
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Unexpected failure while crawling or scoring
    #[error("{0}")]
    Internal(String),
}

impl AuditError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Launch(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AuditError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} preserves the full context chain
        Self::Internal(format!("{err:#}"))
    }
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuditError::InvalidInput("url is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuditError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
