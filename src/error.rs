//! Error types for the search engine.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TributaryError>;

/// Errors produced while configuring or running a search.
#[derive(Debug, Error)]
pub enum TributaryError {
    /// The engine or a reranker was configured inconsistently.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The query capability failed or answered with an error status.
    #[error("failed to retrieve data from table {table}: {message}")]
    Retrieval { table: String, message: String },

    /// A returned record has no value for the configured primary-key field.
    #[error("primary key field {field} not found in the response from table {table}")]
    MissingKey { table: String, field: String },

    /// The primary-key value is neither a string nor an integer.
    #[error("primary key field {field} in table {table} must be a string or an integer")]
    InvalidKey { table: String, field: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TributaryError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        TributaryError::InvalidConfig(msg.into())
    }

    pub fn retrieval(table: impl Into<String>, message: impl Into<String>) -> Self {
        TributaryError::Retrieval {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn missing_key(table: impl Into<String>, field: impl Into<String>) -> Self {
        TributaryError::MissingKey {
            table: table.into(),
            field: field.into(),
        }
    }

    pub fn invalid_key(table: impl Into<String>, field: impl Into<String>) -> Self {
        TributaryError::InvalidKey {
            table: table.into(),
            field: field.into(),
        }
    }

    /// Whether this error was raised by configuration validation rather than retrieval.
    pub fn is_config_error(&self) -> bool {
        matches!(self, TributaryError::InvalidConfig(_))
    }
}
