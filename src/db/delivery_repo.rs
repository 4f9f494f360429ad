// src/db/delivery_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::delivery::{CampingLocation, DeliveryRegion, DeliverySlot},
};

// Regiões, pontos de acampamento e janelas fixas de entrega.
#[derive(Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Regiões ---

    pub async fn get_regions(&self) -> Result<Vec<DeliveryRegion>, AppError> {
        let regions =
            sqlx::query_as::<_, DeliveryRegion>("SELECT * FROM delivery_regions ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(regions)
    }

    pub async fn create_region(
        &self,
        name: &str,
        min_eta_minutes: i32,
        max_eta_minutes: i32,
        is_active: bool,
    ) -> Result<DeliveryRegion, AppError> {
        let region = sqlx::query_as::<_, DeliveryRegion>(
            r#"
            INSERT INTO delivery_regions (name, min_eta_minutes, max_eta_minutes, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(min_eta_minutes)
        .bind(max_eta_minutes)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(region)
    }

    pub async fn update_region(
        &self,
        id: Uuid,
        name: Option<&str>,
        min_eta_minutes: Option<i32>,
        max_eta_minutes: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Option<DeliveryRegion>, AppError> {
        let region = sqlx::query_as::<_, DeliveryRegion>(
            r#"
            UPDATE delivery_regions SET
                name            = COALESCE($2, name),
                min_eta_minutes = COALESCE($3, min_eta_minutes),
                max_eta_minutes = COALESCE($4, max_eta_minutes),
                is_active       = COALESCE($5, is_active),
                updated_at      = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(min_eta_minutes)
        .bind(max_eta_minutes)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(region)
    }

    pub async fn delete_region(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM delivery_regions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Pontos de acampamento ---

    pub async fn get_locations(
        &self,
        region_id: Option<Uuid>,
    ) -> Result<Vec<CampingLocation>, AppError> {
        let locations = match region_id {
            Some(region_id) => {
                sqlx::query_as::<_, CampingLocation>(
                    "SELECT * FROM camping_locations WHERE region_id = $1 ORDER BY name",
                )
                .bind(region_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CampingLocation>(
                    "SELECT * FROM camping_locations ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(locations)
    }

    pub async fn create_location(
        &self,
        region_id: Uuid,
        name: &str,
        address: Option<&str>,
        is_active: bool,
    ) -> Result<CampingLocation, AppError> {
        let location = sqlx::query_as::<_, CampingLocation>(
            r#"
            INSERT INTO camping_locations (region_id, name, address, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(region_id)
        .bind(name)
        .bind(address)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(location)
    }

    pub async fn update_location(
        &self,
        id: Uuid,
        region_id: Option<Uuid>,
        name: Option<&str>,
        address: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<CampingLocation>, AppError> {
        let location = sqlx::query_as::<_, CampingLocation>(
            r#"
            UPDATE camping_locations SET
                region_id  = COALESCE($2, region_id),
                name       = COALESCE($3, name),
                address    = COALESCE($4, address),
                is_active  = COALESCE($5, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(region_id)
        .bind(name)
        .bind(address)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    pub async fn delete_location(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM camping_locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- Janelas fixas ---

    pub async fn get_slots(&self, region_id: Option<Uuid>) -> Result<Vec<DeliverySlot>, AppError> {
        let slots = match region_id {
            Some(region_id) => {
                sqlx::query_as::<_, DeliverySlot>(
                    "SELECT * FROM delivery_slots WHERE region_id = $1 ORDER BY start_time",
                )
                .bind(region_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DeliverySlot>(
                    "SELECT * FROM delivery_slots ORDER BY start_time",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(slots)
    }

    pub async fn create_slot(
        &self,
        region_id: Uuid,
        start_time: &str,
        end_time: &str,
        is_active: bool,
    ) -> Result<DeliverySlot, AppError> {
        let slot = sqlx::query_as::<_, DeliverySlot>(
            r#"
            INSERT INTO delivery_slots (region_id, start_time, end_time, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(region_id)
        .bind(start_time)
        .bind(end_time)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(slot)
    }

    pub async fn update_slot(
        &self,
        id: Uuid,
        region_id: Option<Uuid>,
        start_time: Option<&str>,
        end_time: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<DeliverySlot>, AppError> {
        let slot = sqlx::query_as::<_, DeliverySlot>(
            r#"
            UPDATE delivery_slots SET
                region_id  = COALESCE($2, region_id),
                start_time = COALESCE($3, start_time),
                end_time   = COALESCE($4, end_time),
                is_active  = COALESCE($5, is_active),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(region_id)
        .bind(start_time)
        .bind(end_time)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(slot)
    }

    pub async fn delete_slot(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM delivery_slots WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
