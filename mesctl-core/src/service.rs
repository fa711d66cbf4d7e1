//! Work-order application service
//!
//! The single entry point for business operations. Stateless except for
//! the injected repository; all duplicate-number and deletion rules live
//! here, single-entity rules live on the entity itself.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::repository::WorkOrderRepository;
use crate::status::OrderStatus;
use crate::work_order::{NewWorkOrder, WorkOrder, WorkOrderPatch};

/// Orchestrates entity guards and repository calls.
#[derive(Clone)]
pub struct WorkOrderService {
    repo: Arc<dyn WorkOrderRepository>,
}

impl WorkOrderService {
    /// Repository selection happens at process startup; the service takes
    /// whatever backend it is handed.
    pub fn new(repo: Arc<dyn WorkOrderRepository>) -> Self {
        Self { repo }
    }

    /// Create a work order, defaulting status to PENDING.
    ///
    /// Rejects a duplicate `order_number` before touching storage; the
    /// backend's own uniqueness enforcement still backstops races.
    pub async fn create(&self, req: NewWorkOrder) -> DomainResult<WorkOrder> {
        if self
            .repo
            .get_by_order_number(&req.order_number)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateOrderNumber {
                order_number: req.order_number,
            });
        }

        let order = WorkOrder::new(req)?;
        let persisted = self.repo.add(order).await?;
        tracing::info!(id = %persisted.id, order_number = %persisted.order_number, "work order created");
        Ok(persisted)
    }

    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<WorkOrder>> {
        Ok(self.repo.get_by_id(id).await?)
    }

    pub async fn list(&self, skip: u64, limit: u64) -> DomainResult<Vec<WorkOrder>> {
        Ok(self.repo.list_all(skip, limit).await?)
    }

    pub async fn count(&self) -> DomainResult<i64> {
        Ok(self.repo.count_all().await?)
    }

    /// Apply a partial update.
    ///
    /// Runs every entity guard against the current record before
    /// persisting: order-number uniqueness, the terminal-state freeze and
    /// the quantity rule. Returns `None` when the id is unknown.
    pub async fn update(&self, id: Uuid, patch: WorkOrderPatch) -> DomainResult<Option<WorkOrder>> {
        let Some(mut order) = self.repo.get_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(ref number) = patch.order_number {
            if *number != order.order_number {
                if let Some(existing) = self.repo.get_by_order_number(number).await? {
                    if existing.id != id {
                        return Err(DomainError::DuplicateOrderNumber {
                            order_number: number.clone(),
                        });
                    }
                }
                order.assign_order_number(number.clone())?;
            }
        }

        // The detail freeze only applies when detail fields are present, so
        // a status-only update (including re-asserting a terminal status)
        // is not blocked by it.
        if patch.has_details() {
            order.update_details(
                patch.product_name.clone(),
                patch.quantity,
                patch.due_date,
                patch.notes.clone(),
            )?;
        }

        if let Some(status) = patch.status {
            order.update_status(status)?;
        }

        Ok(self.repo.update(id, patch).await?)
    }

    /// Delete a work order. Forbidden while the order is IN_PROGRESS.
    pub async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        if let Some(order) = self.repo.get_by_id(id).await? {
            if order.status == OrderStatus::InProgress {
                return Err(DomainError::DeleteInProgress);
            }
        }

        let removed = self.repo.delete(id).await?;
        if removed {
            tracing::info!(id = %id, "work order deleted");
        }
        Ok(removed)
    }
}
