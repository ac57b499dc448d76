//! Error types for ASSIST extraction

use thiserror::Error;

/// Error thrown when a receiving institution is not configured
#[derive(Debug, Error)]
#[error("Receiving institution '{receiver}' not found. Available: {}", available.join(", "))]
pub struct ReceiverNotFoundError {
    pub receiver: String,
    pub available: Vec<String>,
}

/// General extraction error type
#[derive(Debug, Error)]
pub enum AssistError {
    #[error(transparent)]
    ReceiverNotFound(#[from] ReceiverNotFoundError),

    /// An embedded agreement collection is present but is not a JSON array
    #[error("Malformed '{field}' payload: {source}")]
    Payload {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The upstream service reported an unsuccessful response
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AssistError>;
