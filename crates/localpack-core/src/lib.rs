pub mod app_config;
pub mod config;
pub mod listing;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{dedup_listings, Listing};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
