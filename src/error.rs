//! Configuration errors
//!
//! The simulation itself never fails: out-of-range input is clamped or
//! ignored. Everything that can go wrong happens while loading tuning or
//! level data, and is reported here.

use thiserror::Error;

/// Errors raised while loading or validating game configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A layout row has a different number of tokens than the first row
    #[error("layout row {row} has {found} tokens, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A layout token that maps to neither a brick color nor empty space
    #[error("unknown layout token {token:?} at row {row}, column {column}")]
    UnknownToken {
        row: usize,
        column: usize,
        token: char,
    },

    /// Tuning values that cannot produce a playable field
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be read
    #[error("file system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;
