//! Error types for model loading and schema generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema generation errors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Model at position {index} has no identity")]
    MissingIdentity { index: usize },

    #[error("Model at position {index} is invalid: {reason}")]
    InvalidModel { index: usize, reason: String },

    #[error("Invalid model list: {0}")]
    InvalidFormat(String),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model filter: {0}")]
    InvalidFilter(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
