//! Error types for Cobertura

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoberturaError {
    // Input errors
    #[error("Invalid GeoJSON in {path}: {reason}")]
    InvalidGeoJson { path: PathBuf, reason: String },

    #[error("Invalid file pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoberturaError {
    fn from(err: serde_json::Error) -> Self {
        CoberturaError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoberturaError>;
