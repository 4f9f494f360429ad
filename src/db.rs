pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod delivery_repo;
pub use delivery_repo::DeliveryRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
