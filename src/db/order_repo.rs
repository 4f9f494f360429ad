// src/db/order_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderItem, OrderStatus, PaymentMethod},
};

// Pedidos, itens de pedido e movimentações de estoque.
// As escritas recebem um executor genérico para poderem participar da
// transação aberta pelo OrderService.
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_orders(&self, user_id: Option<Uuid>) -> Result<Vec<Order>, AppError> {
        let orders = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(orders)
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn get_order_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        let items =
            sqlx::query_as::<_, OrderItem>("SELECT * FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    pub async fn create_order<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        total_amount_in_cents: i64,
        payment_method: PaymentMethod,
        region_id: Option<Uuid>,
        camping_location_id: Option<Uuid>,
        custom_address: Option<&str>,
        delivery_slot_id: Option<Uuid>,
        estimated_delivery_time: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (user_id, total_amount_in_cents, payment_method, region_id,
                 camping_location_id, custom_address, delivery_slot_id,
                 estimated_delivery_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(total_amount_in_cents)
        .bind(payment_method)
        .bind(region_id)
        .bind(camping_location_id)
        .bind(custom_address)
        .bind(delivery_slot_id)
        .bind(estimated_delivery_time)
        .fetch_one(executor)
        .await?;
        Ok(order)
    }

    // Insere o snapshot imutável de uma linha do pedido.
    pub async fn create_order_item<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        product_id: Uuid,
        product_name: &str,
        product_price_in_cents: i32,
        quantity: i32,
        subtotal_in_cents: i64,
    ) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items
                (order_id, product_id, product_name, product_price_in_cents,
                 quantity, subtotal_in_cents)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(product_name)
        .bind(product_price_in_cents)
        .bind(quantity)
        .bind(subtotal_in_cents)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    // Baixa condicional de estoque: só decrementa se houver saldo.
    // Retorna false quando o saldo é insuficiente (zero linhas afetadas).
    pub async fn try_decrement_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2, updated_at = now()
            WHERE id = $1 AND stock >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn record_stock_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity_change: i32,
        reason: &str,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO stock_movements (product_id, quantity_change, reason, notes)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product_id)
        .bind(quantity_change)
        .bind(reason)
        .bind(notes)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Troca de status sem validação de transição: qualquer status pode
    // substituir qualquer outro.
    pub async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }
}
