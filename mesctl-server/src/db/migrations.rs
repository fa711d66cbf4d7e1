//! Startup migrations for the work-order schema
//!
//! Idempotent DDL executed on every boot. The database owns both
//! timestamps: `created_at` via column default, `updated_at` via a
//! BEFORE UPDATE trigger, so application-supplied values are never
//! authoritative.

use sqlx::PgPool;

/// Run all migrations.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running work-order migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS work_orders (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            order_number VARCHAR(50) NOT NULL UNIQUE,
            product_name VARCHAR(100) NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            status TEXT NOT NULL DEFAULT 'PENDING'
                CHECK (status IN (
                    'PENDING', 'IN_PROGRESS', 'COMPLETED', 'CANCELLED',
                    'FAILED', 'ON_HOLD', 'REOPENED'
                )),
            due_date TIMESTAMPTZ,
            notes VARCHAR(500),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Secondary index on id alongside the primary key, matching the
    // original schema layout.
    sqlx::query("CREATE INDEX IF NOT EXISTS ix_work_orders_id ON work_orders (id)")
        .execute(pool)
        .await?;

    // updated_at is refreshed by the database on every row update.
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION set_work_orders_updated_at()
        RETURNS TRIGGER AS $$
        BEGIN
            NEW.updated_at = NOW();
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("DROP TRIGGER IF EXISTS work_orders_set_updated_at ON work_orders")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TRIGGER work_orders_set_updated_at
        BEFORE UPDATE ON work_orders
        FOR EACH ROW
        EXECUTE PROCEDURE set_work_orders_updated_at()
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
