// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// Status do pedido. Nenhuma máquina de estados é imposta na troca de
// status: qualquer valor pode substituir qualquer outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Preparing,
    OnDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub total_amount_in_cents: i64,
    pub payment_method: PaymentMethod,

    // Dados de entrega. Todos opcionais: o endereço pode ser um ponto
    // de acampamento cadastrado ou um texto livre (custom_address).
    pub region_id: Option<Uuid>,
    pub camping_location_id: Option<Uuid>,
    pub custom_address: Option<String>,
    pub delivery_slot_id: Option<Uuid>,

    // Calculado no cliente na submissão e gravado literalmente.
    // Nunca é recomputado no servidor.
    pub estimated_delivery_time: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Snapshot do produto no momento do pedido, desacoplado da linha viva
// de products: edições posteriores de preço/nome não alteram o histórico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price_in_cents: i32,
    pub quantity: i32,
    pub subtotal_in_cents: i64,
    pub created_at: DateTime<Utc>,
}

// --- Payload de criação de pedido ---
// Tipo compartilhado entre o montador do checkout (storefront) e o
// handler POST /api/orders: o cliente monta exatamente o que o
// servidor valida.

#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: Uuid,

    #[validate(length(min = 1, message = "Ürün adı gerekli"))]
    pub product_name: String,

    pub price_in_cents: i32,

    #[validate(range(min = 1, message = "Adet en az 1 olmalıdır"))]
    pub quantity: i32,

    pub subtotal_in_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, validator::Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "Sepetiniz boş"))]
    #[validate(nested)]
    pub items: Vec<OrderItemInput>,

    pub payment_method: PaymentMethod,

    pub region_id: Option<Uuid>,
    pub camping_location_id: Option<Uuid>,

    // Nota de entrega em texto livre.
    pub custom_address: Option<String>,

    // Janela fixa cadastrada pelo admin, quando houver. As janelas
    // dinâmicas não têm linha no banco: viajam só no texto abaixo.
    pub delivery_slot_id: Option<Uuid>,

    #[validate(range(min = 0, message = "Tutar negatif olamaz"))]
    pub total_amount_in_cents: i64,

    pub estimated_delivery_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity_change: i32,
    pub reason: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixa o formato snake_case do enum no JSON (o cliente envia
    // "bank_transfer" e "on_delivery" literalmente).
    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"bank_transfer\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::OnDelivery).unwrap(),
            "\"on_delivery\""
        );
    }

    #[test]
    fn create_order_payload_accepts_the_wire_shape() {
        let json = r#"{
            "items": [{
                "productId": "7f2f1f4e-52f0-4f6b-9a7e-0d7a3b1c9d10",
                "productName": "Kola",
                "priceInCents": 1500,
                "quantity": 2,
                "subtotalInCents": 3000
            }],
            "paymentMethod": "cash",
            "campingLocationId": null,
            "customAddress": "Göl kenarı",
            "totalAmountInCents": 3000,
            "estimatedDeliveryTime": "15.09.2025 14:00 - 15:00"
        }"#;

        let payload: CreateOrderPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.items[0].quantity, 2);
        assert_eq!(payload.payment_method, PaymentMethod::Cash);
        assert_eq!(payload.total_amount_in_cents, 3000);
    }
}
