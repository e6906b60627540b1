//! Domain error types
//!
//! This module defines the error hierarchy for Whisp.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Whisp error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum WhispError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Analysis API errors
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Session errors (not logged in, expired)
    #[error("Session error: {0}")]
    Session(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persisted state errors
    #[error("State management error: {0}")]
    State(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Analysis API errors
///
/// Errors that occur while uploading a file to the analysis API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Failed to reach the API
    #[error("Failed to connect to analysis API: {0}")]
    ConnectionFailed(String),

    /// The API answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not JSON
    #[error("Invalid response from analysis API: {0}")]
    InvalidResponse(String),

    /// The upload file was rejected before sending
    #[error("Invalid file type: {0}")]
    InvalidFile(String),

    /// Another analysis is still running on this runner
    #[error("An analysis is already in progress")]
    InProgress,
}

impl AnalysisError {
    /// HTTP status code if the API answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for WhispError {
    fn from(err: std::io::Error) -> Self {
        WhispError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WhispError {
    fn from(err: serde_json::Error) -> Self {
        WhispError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for WhispError {
    fn from(err: toml::de::Error) -> Self {
        WhispError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<url::ParseError> for WhispError {
    fn from(err: url::ParseError) -> Self {
        WhispError::Validation(format!("Invalid URL: {err}"))
    }
}
