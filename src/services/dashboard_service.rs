// src/services/dashboard_service.rs

use chrono::Utc;
use sqlx::PgPool;

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::DashboardStats};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn get_stats(&self) -> Result<DashboardStats, AppError> {
        self.repo.get_stats(&self.pool, Utc::now()).await
    }
}
