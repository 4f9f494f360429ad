// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        CatalogRepository, DashboardRepository, DeliveryRepository, OrderRepository,
        SettingsRepository, UserRepository,
    },
    services::{AuthService, DashboardService, OrderService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,

    pub auth_service: AuthService,
    pub order_service: OrderService,
    pub dashboard_service: DashboardService,

    // CRUD simples fala direto com o repositório.
    pub user_repo: UserRepository,
    pub catalog_repo: CatalogRepository,
    pub delivery_repo: DeliveryRepository,
    pub settings_repo: SettingsRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let order_service = OrderService::new(order_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo, db_pool.clone());

        Ok(Self {
            i18n_store: I18nStore::new(),
            auth_service,
            order_service,
            dashboard_service,
            user_repo,
            catalog_repo: CatalogRepository::new(db_pool.clone()),
            delivery_repo: DeliveryRepository::new(db_pool.clone()),
            settings_repo: SettingsRepository::new(db_pool.clone()),
            db_pool,
        })
    }
}
