pub mod app_service;
pub mod helpers;
pub mod tracing;

pub use app_service::AppService;
