//! Custom error types for export operations

use thiserror::Error;

/// Message used when the API rejects a request without a usable reason
pub const INVALID_REQUEST_MESSAGE: &str = "The request was invalid, check arguments";

/// Export-related errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// Invalid user input not caught by the argument parser
    #[error("Invalid argument: {message}")]
    ArgumentError {
        message: String,
    },

    /// Network failure or non-success HTTP status
    #[error("Transport error: {message}")]
    TransportError {
        message: String,
    },

    /// The API accepted the request but reported a failure
    #[error("{message}")]
    ApiError {
        message: String,
    },

    /// Response body could not be interpreted
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        path: String,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        ExportError::TransportError {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
