use thiserror::Error;

/// Configuration and vocabulary loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read gender vocabulary file {path}: {source}")]
    VocabFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gender vocabulary file: {0}")]
    VocabFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
