//! Error types for the pacing_core library.

use std::io;

use crate::time::TimeParseError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pacing_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Time text failed validation
    #[error("Invalid time: {0}")]
    InvalidTime(#[from] TimeParseError),

    /// Race key not present in the distance table
    #[error("Unknown race: {0} (expected 5k, 10k, half or marathon)")]
    UnknownRace(String),

    /// Numeric input outside the domain of a formula
    #[error("Domain error: {0}")]
    Domain(String),

    /// Unrecognised option value (unit, humidity)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
