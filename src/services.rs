pub mod auth;
pub use auth::AuthService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod order_service;
pub use order_service::OrderService;
