// src/services/order_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::order::{CreateOrderPayload, Order, OrderItem, OrderStatus},
};

// Motivo gravado em stock_movements para baixas de venda.
const MOVEMENT_REASON_SALE: &str = "SALE";

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(order_repo: OrderRepository, pool: PgPool) -> Self {
        Self { order_repo, pool }
    }

    // Cria o pedido completo em UMA transação: cabeçalho, snapshots das
    // linhas, baixa condicional de estoque e histórico de movimentação.
    // Qualquer linha sem saldo rejeita o pedido inteiro (sem atendimento
    // parcial); o rollback acontece no drop da transação.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        payload: &CreateOrderPayload,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = self
            .order_repo
            .create_order(
                &mut *tx,
                user_id,
                payload.total_amount_in_cents,
                payload.payment_method,
                payload.region_id,
                payload.camping_location_id,
                payload.custom_address.as_deref(),
                payload.delivery_slot_id,
                payload.estimated_delivery_time.as_deref(),
            )
            .await?;

        for item in &payload.items {
            self.order_repo
                .create_order_item(
                    &mut *tx,
                    order.id,
                    item.product_id,
                    &item.product_name,
                    item.price_in_cents,
                    item.quantity,
                    item.subtotal_in_cents,
                )
                .await?;

            let decremented = self
                .order_repo
                .try_decrement_stock(&mut *tx, item.product_id, item.quantity)
                .await?;
            if !decremented {
                return Err(AppError::InsufficientStock(item.product_name.clone()));
            }

            let notes = format!("Sipariş {}", order.id);
            self.order_repo
                .record_stock_movement(
                    &mut *tx,
                    item.product_id,
                    -item.quantity,
                    MOVEMENT_REASON_SALE,
                    Some(&notes),
                )
                .await?;
        }

        tx.commit().await?;
        Ok(order)
    }

    pub async fn list_all_orders(&self) -> Result<Vec<Order>, AppError> {
        self.order_repo.get_orders(None).await
    }

    pub async fn list_user_orders(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        self.order_repo.get_orders(Some(user_id)).await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        self.order_repo.get_order(id).await
    }

    pub async fn get_order_items(&self, order_id: Uuid) -> Result<Vec<OrderItem>, AppError> {
        self.order_repo.get_order_items(order_id).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        self.order_repo.update_order_status(id, status).await
    }
}
