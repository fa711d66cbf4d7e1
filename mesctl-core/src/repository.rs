//! Repository contract for work-order storage backends
//!
//! Polymorphic over the storage medium: the in-memory implementation lives
//! in [`crate::memory`], the Postgres implementation in mesctl-server.
//! Both must behave identically from the caller's perspective.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::work_order::{WorkOrder, WorkOrderPatch};

pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Storage contract for work orders.
///
/// Absence is not an error: lookups return `None` and `delete` returns
/// `false` for unknown ids. The only backend-originated failure modes are
/// an `order_number` conflict and a storage-engine error.
#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    /// Fetch by id. `None` if absent.
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<WorkOrder>>;

    /// Persist a new order. Fails with [`RepositoryError::Conflict`] when
    /// the `order_number` collides with an existing record. Returns the
    /// persisted record with backend-stamped timestamps.
    async fn add(&self, order: WorkOrder) -> RepoResult<WorkOrder>;

    /// Apply the provided fields to an existing record. `None` if the id is
    /// unknown; conflict error if an `order_number` change collides with
    /// another record. The backend refreshes `updated_at` itself.
    async fn update(&self, id: Uuid, patch: WorkOrderPatch) -> RepoResult<Option<WorkOrder>>;

    /// Remove a record. `true` if something was deleted.
    async fn delete(&self, id: Uuid) -> RepoResult<bool>;

    /// Stable pagination window over all records in insertion order.
    async fn list_all(&self, skip: u64, limit: u64) -> RepoResult<Vec<WorkOrder>>;

    /// Total record count, independent of pagination.
    async fn count_all(&self) -> RepoResult<i64>;

    /// Exact-match lookup on `order_number`. `None` if absent.
    async fn get_by_order_number(&self, order_number: &str) -> RepoResult<Option<WorkOrder>>;
}
