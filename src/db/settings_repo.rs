// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::settings::Setting};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<Setting>, AppError> {
        let setting = sqlx::query_as::<_, Setting>("SELECT * FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(setting)
    }

    // Upsert pela chave primária.
    pub async fn set_setting(
        &self,
        key: &str,
        value: &serde_json::Value,
        description: Option<&str>,
    ) -> Result<Setting, AppError> {
        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE SET
                value       = EXCLUDED.value,
                description = EXCLUDED.description,
                updated_at  = now()
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(setting)
    }
}
