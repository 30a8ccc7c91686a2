//! Error types for fanout-core

use fanout_io::IoError;
use fanout_stats::ScaleError;
use thiserror::Error;

/// Result type alias for fanout operations
pub type Result<T> = std::result::Result<T, FanoutError>;

/// Main error type for fanout operations
#[derive(Error, Debug)]
pub enum FanoutError {
    /// Reading edges or writing the matrix failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Backing store failures
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Scaling refused the feature table
    #[error("Scaling error: {0}")]
    Scale(#[from] ScaleError),

    /// Bad or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Persistence-specific errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// A stored value does not fit the feature model
    #[error("Invalid stored value in {table}: {reason}")]
    InvalidValue { table: String, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of its valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Required field is missing or empty
    #[error("Missing field: {0}")]
    MissingField(String),

    /// The config text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The config file could not be read
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(err.to_string())
    }
}

impl From<rusqlite::Error> for FanoutError {
    fn from(err: rusqlite::Error) -> Self {
        FanoutError::Persistence(PersistenceError::Database(err.to_string()))
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
