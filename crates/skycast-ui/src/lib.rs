pub mod app_services;
pub mod error_mapping;
pub mod input;
pub mod models;
pub mod services;
pub mod shell;
pub mod view;

#[cfg(test)]
mod test_support;

pub use app_services::AppServices;
pub use models::DashboardModel;
