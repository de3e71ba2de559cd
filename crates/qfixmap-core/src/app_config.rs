use std::net::SocketAddr;
use std::path::PathBuf;

use crate::gender::Gender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base booking URL that resolved category/material IDs are appended to.
    pub base_url: String,
    /// Subcategory fallback when a gender token cannot be resolved.
    /// `None` means no fallback: the subcategory ID is omitted instead.
    pub default_gender: Option<Gender>,
    /// Optional YAML overlay extending the built-in gender vocabulary.
    pub gender_vocab_path: Option<PathBuf>,
}
