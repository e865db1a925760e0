//! Error types for the resibo-core library.
//!
//! The extraction pipeline itself never fails: a malformed or empty input
//! simply produces a sparse [`crate::models::Record`] (see the orchestrator).
//! These errors exist only at the crate's actual I/O boundaries: loading a
//! line sequence from a serialized source, and reading/writing configuration.

use thiserror::Error;

/// Main error type for the resibo library.
#[derive(Error, Debug)]
pub enum ResiboError {
    /// Failed to load a line sequence from a serialized source.
    #[error("line source error: {0}")]
    LineSource(#[from] LineSourceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to loading OCR line sequences.
#[derive(Error, Debug)]
pub enum LineSourceError {
    /// The source contained no lines.
    #[error("line source is empty")]
    Empty,

    /// The source could not be parsed as JSON.
    #[error("failed to parse line source: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors related to configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config: {0}")]
    Read(String),

    /// Failed to parse the config file.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for the resibo library.
pub type Result<T> = std::result::Result<T, ResiboError>;
