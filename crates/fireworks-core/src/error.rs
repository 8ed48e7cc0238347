//! Error types for the fireworks crates

use thiserror::Error;

/// The main error type for fireworks operations
#[derive(Debug, Error)]
pub enum FireworksError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Invalid field type: expected {expected}, got {got}")]
    InvalidFieldType { expected: String, got: String },

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for fireworks operations
pub type Result<T> = std::result::Result<T, FireworksError>;

impl From<toml::de::Error> for FireworksError {
    fn from(err: toml::de::Error) -> Self {
        FireworksError::TomlParseError(err.to_string())
    }
}
