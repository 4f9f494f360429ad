// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

// Agregados do painel. Sempre recomputados por requisição, sem cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub today_orders: i64,
    pub today_revenue: i64,
    pub week_orders: i64,
    pub week_revenue: i64,
    pub top_products: Vec<TopProductEntry>,
}

// Top 5 produtos por receita, somando os snapshots de order_items.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_sold: i64,
    pub revenue: i64,
}
