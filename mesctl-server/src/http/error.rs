//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes:
//! not-found maps to 404, every business rejection (conflict, invalid
//! transition, invalid operation, invalid value) maps to 400 with the
//! same body shape, storage failures map to 500 and are logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use mesctl_core::error::{DomainError, RepositoryError};

use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request-shape validation failed (400)
    Validation(ValidationError),

    /// Business rule rejection (400)
    Domain(DomainError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Storage or other unexpected failure (500, logged)
    Internal { message: String },
}

fn domain_error_kind(err: &DomainError) -> &'static str {
    match err {
        DomainError::DuplicateOrderNumber { .. } => "conflict",
        DomainError::Repository(RepositoryError::Conflict { .. }) => "conflict",
        DomainError::InvalidTransition { .. } => "invalid_transition",
        DomainError::DetailsFrozen { .. } | DomainError::DeleteInProgress => "invalid_operation",
        DomainError::NonPositiveQuantity => "invalid_value",
        DomainError::Repository(RepositoryError::Storage { .. }) => "internal_error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Domain(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": domain_error_kind(e),
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Internal { message } => {
                // Log the actual error, return a generic message
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Repository(RepositoryError::Storage { source }) => Self::Internal {
                message: source.to_string(),
            },
            other => Self::Domain(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesctl_core::status::OrderStatus;

    #[test]
    fn business_rejections_are_bad_requests() {
        for err in [
            DomainError::DuplicateOrderNumber {
                order_number: "WO-1".into(),
            },
            DomainError::InvalidTransition {
                current: OrderStatus::Completed,
                requested: OrderStatus::Pending,
            },
            DomainError::DetailsFrozen {
                current: OrderStatus::Cancelled,
            },
            DomainError::DeleteInProgress,
            DomainError::NonPositiveQuantity,
        ] {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn storage_errors_become_internal() {
        let err = DomainError::Repository(RepositoryError::storage("connection refused"));
        let api: ApiError = err.into();
        assert!(matches!(api, ApiError::Internal { .. }));

        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_is_404() {
        let response = ApiError::NotFound {
            resource: "work order",
            id: "abc".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
