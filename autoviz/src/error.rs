//! Error types for the autoviz library.
//!
//! Profiling and planning never fail: anomalies in the data are absorbed into
//! defaults, empty lists and coercion counters. Errors only exist at the edges
//! of the crate, where raw JSON is ingested, configuration is loaded, or plans
//! are serialized for output.

use thiserror::Error;

/// The main error type for the autoviz library.
#[derive(Error, Debug)]
pub enum VizError {
    /// The input document does not have the shape of a record collection.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configuration value is out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A type alias for `Result<T, VizError>`.
pub type Result<T> = std::result::Result<T, VizError>;

impl VizError {
    /// Creates an invalid input error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for VizError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Serialization(format!("failed to write formatted output: {err}"))
    }
}
