pub mod app_config;
pub mod config;
pub mod meta;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use meta::{
    EntityMeta, LookupTarget, MetaDescriptor, MetaRequest, BRAND_NAME, DEFAULT_DESCRIPTION,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
