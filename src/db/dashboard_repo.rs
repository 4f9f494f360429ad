// src/db/dashboard_repo.rs

use chrono::{DateTime, Duration, Utc};
use sqlx::{Acquire, Executor, PgPool, Postgres, Row};

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardStats, TopProductEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Agregados do painel dentro de uma transação, para um snapshot
    // consistente entre as somas.
    pub async fn get_stats<'e, E>(
        &self,
        executor: E,
        now: DateTime<Utc>,
    ) -> Result<DashboardStats, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let today_start = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();
        let week_start = now - Duration::days(7);

        let (total_orders, total_revenue) = Self::count_and_revenue_since(&mut tx, None).await?;
        let (today_orders, today_revenue) =
            Self::count_and_revenue_since(&mut tx, Some(today_start)).await?;
        let (week_orders, week_revenue) =
            Self::count_and_revenue_since(&mut tx, Some(week_start)).await?;

        // Top 5 produtos por receita, somando os snapshots dos itens.
        let top_products = sqlx::query_as::<_, TopProductEntry>(
            r#"
            SELECT
                product_id,
                product_name,
                SUM(quantity)::BIGINT          AS total_sold,
                SUM(subtotal_in_cents)::BIGINT AS revenue
            FROM order_items
            GROUP BY product_id, product_name
            ORDER BY SUM(subtotal_in_cents) DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardStats {
            total_orders,
            total_revenue,
            today_orders,
            today_revenue,
            week_orders,
            week_revenue,
            top_products,
        })
    }

    async fn count_and_revenue_since(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        since: Option<DateTime<Utc>>,
    ) -> Result<(i64, i64), AppError> {
        let row = match since {
            Some(since) => {
                sqlx::query(
                    r#"
                    SELECT COUNT(*) AS count,
                           COALESCE(SUM(total_amount_in_cents), 0)::BIGINT AS revenue
                    FROM orders
                    WHERE created_at >= $1
                    "#,
                )
                .bind(since)
                .fetch_one(&mut **tx)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT COUNT(*) AS count,
                           COALESCE(SUM(total_amount_in_cents), 0)::BIGINT AS revenue
                    FROM orders
                    "#,
                )
                .fetch_one(&mut **tx)
                .await?
            }
        };

        Ok((row.try_get("count")?, row.try_get("revenue")?))
    }
}
