//! In-memory repository backend
//!
//! Data lives for the process lifetime only. Every read and write hands
//! back an independent clone so callers can never mutate stored state
//! through a returned value. Uniqueness is enforced by linear scan, which
//! is fine at in-memory scale.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::repository::{RepoResult, WorkOrderRepository};
use crate::work_order::{WorkOrder, WorkOrderPatch};

#[derive(Default)]
struct Store {
    orders: HashMap<Uuid, WorkOrder>,
    // Insertion order, so pagination windows are stable.
    insertion: Vec<Uuid>,
}

/// Ephemeral work-order store, safe to share across handlers.
#[derive(Default)]
pub struct InMemoryWorkOrderRepository {
    store: RwLock<Store>,
}

impl InMemoryWorkOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all records. Test helper.
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        store.orders.clear();
        store.insertion.clear();
    }
}

#[async_trait]
impl WorkOrderRepository for InMemoryWorkOrderRepository {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<WorkOrder>> {
        let store = self.store.read().await;
        Ok(store.orders.get(&id).cloned())
    }

    async fn add(&self, mut order: WorkOrder) -> RepoResult<WorkOrder> {
        let mut store = self.store.write().await;

        if store
            .orders
            .values()
            .any(|existing| existing.order_number == order.order_number)
        {
            return Err(RepositoryError::conflict(order.order_number));
        }

        // The backend owns the timestamps, mirroring the relational
        // backend's server-side defaults.
        let now = Utc::now();
        order.created_at = now;
        order.updated_at = now;

        store.insertion.push(order.id);
        store.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, id: Uuid, patch: WorkOrderPatch) -> RepoResult<Option<WorkOrder>> {
        let mut store = self.store.write().await;

        if !store.orders.contains_key(&id) {
            return Ok(None);
        }

        if let Some(ref number) = patch.order_number {
            let collision = store
                .orders
                .values()
                .any(|other| other.id != id && &other.order_number == number);
            if collision {
                return Err(RepositoryError::conflict(number.clone()));
            }
        }

        let Some(order) = store.orders.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(number) = patch.order_number {
            order.order_number = number;
        }
        if let Some(name) = patch.product_name {
            order.product_name = name;
        }
        if let Some(quantity) = patch.quantity {
            order.quantity = quantity;
        }
        if let Some(status) = patch.status {
            order.status = status;
        }
        if let Some(due_date) = patch.due_date {
            order.due_date = Some(due_date);
        }
        if let Some(notes) = patch.notes {
            order.notes = Some(notes);
        }
        order.updated_at = Utc::now();

        Ok(Some(order.clone()))
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.orders.remove(&id).is_some();
        if removed {
            store.insertion.retain(|entry| *entry != id);
        }
        Ok(removed)
    }

    async fn list_all(&self, skip: u64, limit: u64) -> RepoResult<Vec<WorkOrder>> {
        let store = self.store.read().await;
        let orders = store
            .insertion
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .filter_map(|id| store.orders.get(id).cloned())
            .collect();
        Ok(orders)
    }

    async fn count_all(&self) -> RepoResult<i64> {
        let store = self.store.read().await;
        Ok(store.orders.len() as i64)
    }

    async fn get_by_order_number(&self, order_number: &str) -> RepoResult<Option<WorkOrder>> {
        let store = self.store.read().await;
        Ok(store
            .orders
            .values()
            .find(|order| order.order_number == order_number)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::OrderStatus;
    use crate::work_order::NewWorkOrder;

    fn order(number: &str, quantity: i32) -> WorkOrder {
        WorkOrder::new(NewWorkOrder {
            order_number: number.into(),
            product_name: "Gearbox".into(),
            quantity,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn add_then_lookup_by_id_and_number() {
        let repo = InMemoryWorkOrderRepository::new();
        let added = repo.add(order("WO-100", 5)).await.unwrap();

        let by_id = repo.get_by_id(added.id).await.unwrap().unwrap();
        assert_eq!(by_id, added);

        let by_number = repo.get_by_order_number("WO-100").await.unwrap().unwrap();
        assert_eq!(by_number.id, added.id);

        assert!(repo.get_by_order_number("WO-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_order_number_conflicts() {
        let repo = InMemoryWorkOrderRepository::new();
        repo.add(order("WO-100", 5)).await.unwrap();

        let err = repo.add(order("WO-100", 7)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
        assert_eq!(repo.count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn returned_records_are_independent_copies() {
        let repo = InMemoryWorkOrderRepository::new();
        let added = repo.add(order("WO-100", 5)).await.unwrap();

        let mut fetched = repo.get_by_id(added.id).await.unwrap().unwrap();
        fetched.quantity = 9999;
        fetched.product_name.clear();

        let stored = repo.get_by_id(added.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 5);
        assert_eq!(stored.product_name, "Gearbox");
    }

    #[tokio::test]
    async fn update_applies_patch_and_refreshes_updated_at() {
        let repo = InMemoryWorkOrderRepository::new();
        let added = repo.add(order("WO-100", 5)).await.unwrap();

        let updated = repo
            .update(
                added.id,
                WorkOrderPatch {
                    quantity: Some(12),
                    status: Some(OrderStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quantity, 12);
        assert_eq!(updated.status, OrderStatus::InProgress);
        assert!(updated.updated_at >= added.updated_at);
        assert_eq!(updated.created_at, added.created_at);
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let repo = InMemoryWorkOrderRepository::new();
        let result = repo
            .update(Uuid::new_v4(), WorkOrderPatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_to_taken_order_number_conflicts() {
        let repo = InMemoryWorkOrderRepository::new();
        repo.add(order("WO-100", 5)).await.unwrap();
        let second = repo.add(order("WO-200", 5)).await.unwrap();

        let err = repo
            .update(
                second.id,
                WorkOrderPatch {
                    order_number: Some("WO-100".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));

        // Re-asserting its own number is not a collision.
        let same = repo
            .update(
                second.id,
                WorkOrderPatch {
                    order_number: Some("WO-200".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(same.is_some());
    }

    #[tokio::test]
    async fn delete_is_idempotent_about_absence() {
        let repo = InMemoryWorkOrderRepository::new();
        let added = repo.add(order("WO-100", 5)).await.unwrap();

        assert!(repo.delete(added.id).await.unwrap());
        assert!(!repo.delete(added.id).await.unwrap());
        assert!(repo.get_by_id(added.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pagination_windows_are_disjoint_and_exhaustive() {
        let repo = InMemoryWorkOrderRepository::new();
        for i in 0..7 {
            repo.add(order(&format!("WO-{i:03}"), 1)).await.unwrap();
        }

        let first = repo.list_all(0, 3).await.unwrap();
        let second = repo.list_all(3, 3).await.unwrap();
        let third = repo.list_all(6, 3).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);
        assert_eq!(third.len(), 1);

        let mut numbers: Vec<String> = first
            .iter()
            .chain(&second)
            .chain(&third)
            .map(|o| o.order_number.clone())
            .collect();
        let expected: Vec<String> = (0..7).map(|i| format!("WO-{i:03}")).collect();
        assert_eq!(numbers, expected);

        numbers.dedup();
        assert_eq!(numbers.len(), 7);
        assert_eq!(repo.count_all().await.unwrap(), 7);
    }
}
