//! Error types for the matriq-core library.
//!
//! Field extraction itself never fails; these errors cover the edges where
//! payloads and configuration enter the library.

use thiserror::Error;

/// Main error type for the matriq library.
#[derive(Error, Debug)]
pub enum MatriqError {
    /// OCR payload could not be read.
    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR payload input.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The input contained no data at all.
    #[error("payload is empty")]
    Empty,

    /// The payload JSON does not have the expected shape.
    #[error("invalid payload: {0}")]
    Invalid(String),
}

/// Result type for the matriq library.
pub type Result<T> = std::result::Result<T, MatriqError>;
