//! Configuration domain module
//!
//! Validated value objects describing what the dashboard charts and how its
//! overlays are parameterised.

pub mod dashboard_config;
pub mod indicator_config;

pub use dashboard_config::DashboardConfig;
pub use indicator_config::IndicatorConfig;
