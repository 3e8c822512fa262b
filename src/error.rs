//! Error types for the banking query pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, BankQueryError>;

#[derive(Error, Debug)]
pub enum BankQueryError {

    // =============================
    // Core Pipeline Errors
    // =============================

    /// Classification produced `unknown`, or a category with no routing
    /// entry. Surfaced to the caller as a client error.
    #[error("Query not recognized. Try rephrasing.")]
    UnrecognizedQuery,

    /// The text-generation service failed at the transport level, at either
    /// the classification or the humanization stage.
    #[error("Generation service error: {0}")]
    Generation(String),

    /// The banking backend returned a non-success status or was
    /// unreachable. Carries the upstream detail verbatim.
    #[error("API Error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
