//! Shared foundations for the qfixmap workspace: record shapes, text
//! normalization, the gender vocabulary, and application configuration.

pub mod app_config;
mod config;
mod error;
pub mod gender;
pub mod normalize;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_BASE_URL};
pub use error::ConfigError;
pub use types::{
    CatalogRow, MergeStatus, MergedProductRecord, ProductRecord, ResolvedMapping, UnmappedEntry,
};
