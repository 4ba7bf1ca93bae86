pub mod app_config;
pub mod config;
pub mod display;
pub mod filter;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{Category, ColorOption, DisplayProduct, SizeOption};
pub use filter::{build_query, canonical_key, FilterState, SortKey, StockFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
