//! Error types for the sizehint width-resolution engine.

use thiserror::Error;

/// Failures reported by a host view-configuration source.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(String),

    #[error("Malformed URL: {0}")]
    MalformedUrl(String),
}

/// Rule table validation errors, raised when tables are assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Identifiers present in more than one exact table: {}", .identifiers.join(", "))]
    Conflict { identifiers: Vec<String> },

    #[error("Rule {rule} in table {table} has zero width")]
    ZeroWidth { table: String, rule: String },

    #[error("Exact override {identifier} has zero width")]
    ZeroOverride { identifier: String },
}

/// Crate-level errors: configuration loading, table assembly, logging, CLI I/O.
#[derive(Debug, Error)]
pub enum SizehintError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rule table error: {0}")]
    TableError(#[from] TableError),

    #[error("Resolve error: {0}")]
    ResolveError(#[from] ResolveError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<config::ConfigError> for SizehintError {
    fn from(err: config::ConfigError) -> Self {
        SizehintError::ConfigError(err.to_string())
    }
}
