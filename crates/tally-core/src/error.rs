//! Core error types for tally-core.
//!
//! Malformed records are never an error here: the timeline skips them. These
//! types cover what the caller hands in (labels, dates, files) and the
//! configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tally-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Record loading errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration schema
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not resolve or create the data directory
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Errors raised while reading record files.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read the input file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not valid JSON
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level input is not an array of objects
    #[error("Expected a JSON array of records in {path}")]
    NotAnArray { path: PathBuf },

    /// An element (array index or 1-based line) is not a JSON object
    #[error("Record {position} in {path} is not a JSON object")]
    NotAnObject { path: PathBuf, position: usize },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Period label has the wrong length for its granularity
    #[error("Invalid period label '{label}': expected {expected_len} characters")]
    InvalidPeriodLabel { label: String, expected_len: usize },

    /// Input could not be parsed as a date/time
    #[error("Invalid date/time '{input}'")]
    InvalidDateTime { input: String },

    /// Range start is after range end
    #[error("Invalid time range: start ({start}) is after end ({end})")]
    InvalidRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
