pub mod catalog;
pub mod health;
pub mod recommendations;

pub use catalog::catalog_config;
pub use health::health_check;
pub use recommendations::recommendations_config;
