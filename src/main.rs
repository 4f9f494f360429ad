// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;

use escapetable::config::AppState;
use escapetable::handlers;
use escapetable::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é adequado aqui: se a configuração falhar, a aplicação
    // não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route(
            "/me",
            get(handlers::auth::get_me).patch(handlers::auth::update_me),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Catálogo: leitura pública; escrita exige StaffUser (extrator).
    let catalog_routes = Router::new()
        .route(
            "/categories",
            get(handlers::categories::get_all_categories).post(handlers::categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::categories::get_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            "/products",
            get(handlers::products::get_all_products).post(handlers::products::create_product),
        )
        .route(
            "/products/featured/list",
            get(handlers::products::get_featured_products),
        )
        .route("/products/search", get(handlers::products::search_products))
        .route(
            "/products/{id}",
            get(handlers::products::get_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        );

    // Entrega: regiões, pontos de acampamento e janelas fixas.
    let delivery_routes = Router::new()
        .route(
            "/delivery-regions",
            get(handlers::delivery::get_all_regions).post(handlers::delivery::create_region),
        )
        .route(
            "/delivery-regions/{id}",
            patch(handlers::delivery::update_region).delete(handlers::delivery::delete_region),
        )
        .route(
            "/camping-locations",
            get(handlers::delivery::get_all_locations).post(handlers::delivery::create_location),
        )
        .route(
            "/camping-locations/{id}",
            patch(handlers::delivery::update_location).delete(handlers::delivery::delete_location),
        )
        .route(
            "/delivery-slots",
            get(handlers::delivery::get_all_slots).post(handlers::delivery::create_slot),
        )
        .route(
            "/delivery-slots/{id}",
            patch(handlers::delivery::update_slot).delete(handlers::delivery::delete_slot),
        );

    // Pedidos: tudo autenticado; a troca de status exige staff.
    let order_routes = Router::new()
        .route(
            "/",
            get(handlers::orders::get_orders).post(handlers::orders::create_order),
        )
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/items", get(handlers::orders::get_order_items))
        .route("/{id}/status", patch(handlers::orders::update_order_status))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Back-office.
    let admin_routes = Router::new()
        .route("/orders", get(handlers::orders::get_all_orders_admin))
        .route(
            "/dashboard-stats",
            get(handlers::dashboard::get_dashboard_stats),
        );

    let settings_routes = Router::new()
        .route("/", post(handlers::settings::set_setting))
        .route("/{key}", get(handlers::settings::get_setting));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api", catalog_routes.merge(delivery_routes))
        .nest("/api/orders", order_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/settings", settings_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().expect("endereço local indisponível")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
