// src/models/delivery.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Regiões de entrega ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRegion {
    pub id: Uuid,
    pub name: String,
    pub min_eta_minutes: i32,
    pub max_eta_minutes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Pontos de acampamento ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CampingLocation {
    pub id: Uuid,
    pub region_id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Janelas fixas cadastradas pelo admin ---
// start_time/end_time no formato "HH:MM". As janelas dinâmicas do
// checkout vivem em storefront::slots e nunca passam pelo banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySlot {
    pub id: Uuid,
    pub region_id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
