//! # Storefront Error Types
//!
//! Typed error handling for the foodie storefront.
//! Fallible operations return `Result<T, StoreError>`; cart operations are
//! total and never fail.

use thiserror::Error;

/// Shown when the server rejects a request without saying why.
pub const REQUEST_FAILURE_MESSAGE: &str = "Something went wrong, failed to send request.";

/// Shown when no response was obtained at all.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Core error type for all storefront operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A checkout form field (or the cart itself) is not fit to submit
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The server answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    /// Network failure before a response was obtained
    #[error("Transport error: {0}")]
    Transport(String),

    /// Payload or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Shorthand for a validation failure on one field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if retrying the same request might succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Transport(_) => true,
            StoreError::Request { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The text a view should put in its error panel.
    ///
    /// Server-supplied messages are passed through; transport and body
    /// failures collapse to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Request { message, .. } => message.clone(),
            StoreError::Validation { message, .. } => message.clone(),
            StoreError::Configuration(message) => message.clone(),
            StoreError::Transport(_) | StoreError::Serialization(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Result type alias for storefront operations
pub type StoreResult<T> = Result<T, StoreError>;
