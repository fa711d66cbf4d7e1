//! Structured error types for the work-order domain.
//!
//! Uses `thiserror` for composable library errors. The binary crate
//! (mesctl-cli) wraps these in `anyhow` for convenience; the HTTP layer
//! maps them onto status codes.

use thiserror::Error;

use crate::status::OrderStatus;

/// Failures surfaced by a repository backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Uniqueness violation on `order_number`.
    #[error("work order with number '{order_number}' already exists")]
    Conflict { order_number: String },

    /// Underlying storage engine failure. Rolled back and re-raised,
    /// never swallowed.
    #[error("storage error: {source}")]
    Storage {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RepositoryError {
    pub fn conflict(order_number: impl Into<String>) -> Self {
        Self::Conflict {
            order_number: order_number.into(),
        }
    }

    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }
}

/// Business-rule failures for work-order operations.
///
/// Every variant is terminal for the call that triggered it; nothing is
/// retried in the core.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Duplicate `order_number` detected by the service's pre-check.
    #[error("work order with number '{order_number}' already exists")]
    DuplicateOrderNumber { order_number: String },

    /// Status change attempted on a terminal-state order.
    #[error("cannot change status of a {current} work order")]
    InvalidTransition { current: OrderStatus, requested: OrderStatus },

    /// Detail update attempted on a terminal-state order.
    #[error("cannot update details of a {current} work order")]
    DetailsFrozen { current: OrderStatus },

    /// Delete attempted while the order is being worked on.
    #[error("cannot delete a work order that is in progress")]
    DeleteInProgress,

    /// Provided quantity was not strictly positive.
    #[error("quantity must be positive")]
    NonPositiveQuantity,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
