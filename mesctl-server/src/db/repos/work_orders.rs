//! Postgres work-order repository
//!
//! Implements the core repository contract on top of sqlx. Uniqueness is
//! the database's job: a 23505 unique violation on `order_number` surfaces
//! as the same conflict error the in-memory backend produces. Timestamps
//! come back from the database (column default on insert, trigger on
//! update), never from the caller.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use mesctl_core::error::RepositoryError;
use mesctl_core::repository::{RepoResult, WorkOrderRepository};
use mesctl_core::status::OrderStatus;
use mesctl_core::work_order::{WorkOrder, WorkOrderPatch};

/// Work-order repository backed by a Postgres pool.
#[derive(Clone)]
pub struct PgWorkOrderRepository {
    pool: PgPool,
}

impl PgWorkOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(row: &PgRow) -> Result<WorkOrder, RepositoryError> {
    let status_raw: String = row.get("status");
    let status: OrderStatus = status_raw.parse().map_err(RepositoryError::storage)?;

    Ok(WorkOrder {
        id: row.get("id"),
        order_number: row.get("order_number"),
        product_name: row.get("product_name"),
        quantity: row.get("quantity"),
        status,
        due_date: row.get("due_date"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Classify a sqlx error: unique violations become conflicts, everything
/// else is a storage failure.
fn map_write_err(err: sqlx::Error, order_number: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::conflict(order_number)
        }
        _ => RepositoryError::storage(err),
    }
}

#[async_trait]
impl WorkOrderRepository for PgWorkOrderRepository {
    async fn get_by_id(&self, id: Uuid) -> RepoResult<Option<WorkOrder>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, product_name, quantity, status,
                   due_date, notes, created_at, updated_at
            FROM work_orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn add(&self, order: WorkOrder) -> RepoResult<WorkOrder> {
        let row = sqlx::query(
            r#"
            INSERT INTO work_orders (id, order_number, product_name, quantity, status, due_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_number, product_name, quantity, status,
                      due_date, notes, created_at, updated_at
            "#,
        )
        .bind(order.id)
        .bind(&order.order_number)
        .bind(&order.product_name)
        .bind(order.quantity)
        .bind(order.status.as_str())
        .bind(order.due_date)
        .bind(&order.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_err(e, &order.order_number))?;

        map_row(&row)
    }

    async fn update(&self, id: Uuid, patch: WorkOrderPatch) -> RepoResult<Option<WorkOrder>> {
        // COALESCE keeps unset fields at their current value; a patch
        // cannot null out an optional column. updated_at is refreshed by
        // the trigger.
        let row = sqlx::query(
            r#"
            UPDATE work_orders SET
                order_number = COALESCE($2, order_number),
                product_name = COALESCE($3, product_name),
                quantity     = COALESCE($4, quantity),
                status       = COALESCE($5, status),
                due_date     = COALESCE($6, due_date),
                notes        = COALESCE($7, notes)
            WHERE id = $1
            RETURNING id, order_number, product_name, quantity, status,
                      due_date, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.order_number)
        .bind(&patch.product_name)
        .bind(patch.quantity)
        .bind(patch.status.map(|s| s.as_str().to_owned()))
        .bind(patch.due_date)
        .bind(&patch.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_err(e, patch.order_number.as_deref().unwrap_or("")))?;

        row.as_ref().map(map_row).transpose()
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM work_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self, skip: u64, limit: u64) -> RepoResult<Vec<WorkOrder>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_number, product_name, quantity, status,
                   due_date, notes, created_at, updated_at
            FROM work_orders
            ORDER BY created_at ASC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(skip as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        rows.iter().map(map_row).collect()
    }

    async fn count_all(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM work_orders")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        Ok(count)
    }

    async fn get_by_order_number(&self, order_number: &str) -> RepoResult<Option<WorkOrder>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_number, product_name, quantity, status,
                   due_date, notes, created_at, updated_at
            FROM work_orders
            WHERE order_number = $1
            "#,
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        row.as_ref().map(map_row).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesctl_core::work_order::NewWorkOrder;

    // Integration tests - run with DATABASE_URL set:
    // DATABASE_URL=postgres://... cargo test -p mesctl-server -- --ignored

    async fn repo() -> PgWorkOrderRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::pool::create_pool(&url)
            .await
            .expect("pool creation failed");
        crate::db::migrations::run(&pool)
            .await
            .expect("migrations failed");
        PgWorkOrderRepository::new(pool)
    }

    fn order(number: String) -> WorkOrder {
        WorkOrder::new(NewWorkOrder {
            order_number: number,
            product_name: "Test gear".into(),
            quantity: 3,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_and_fetch_roundtrip() {
        let repo = repo().await;
        let number = format!("WO-{}", Uuid::new_v4());

        let added = repo.add(order(number.clone())).await.unwrap();
        assert_eq!(added.status, OrderStatus::Pending);
        // Database stamped both timestamps in the same statement.
        assert_eq!(added.created_at, added.updated_at);

        let fetched = repo.get_by_order_number(&number).await.unwrap().unwrap();
        assert_eq!(fetched.id, added.id);

        assert!(repo.delete(added.id).await.unwrap());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_number_maps_to_conflict() {
        let repo = repo().await;
        let number = format!("WO-{}", Uuid::new_v4());

        let added = repo.add(order(number.clone())).await.unwrap();
        let err = repo.add(order(number)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));

        repo.delete(added.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn trigger_refreshes_updated_at() {
        let repo = repo().await;
        let number = format!("WO-{}", Uuid::new_v4());

        let added = repo.add(order(number)).await.unwrap();
        let updated = repo
            .update(
                added.id,
                WorkOrderPatch {
                    quantity: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.quantity, 9);
        assert!(updated.updated_at > added.updated_at);
        assert_eq!(updated.created_at, added.created_at);

        repo.delete(added.id).await.unwrap();
    }
}
