//! Error types for ACME DNS providers
//!
//! This module defines all error types used throughout the workspace.
//! Variants fall into four groups: validation, transport, API status and
//! configuration. None of them are retried by the providers.

use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ACME DNS providers
#[derive(Error, Debug)]
pub enum Error {
    /// The record is not a TXT record
    #[error("Unsupported record type: only TXT records are accepted (got {0})")]
    UnsupportedRecordType(String),

    /// The record name is not an `_acme-challenge` label
    #[error("Name not allowed: only _acme-challenge TXT records are accepted (got {0:?})")]
    NameNotAllowed(String),

    /// Invalid input (empty zone, malformed arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors (missing credentials, bad endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx HTTP response, body passed through as-is
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API envelope decoded but its status was not "ok"
    #[error("API status {status}: {message}")]
    ApiStatus {
        /// Status reported by the backend
        status: String,
        /// Message reported by the backend
        message: String,
    },

    /// The operation was cancelled or ran past its deadline
    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an HTTP status error carrying the raw response body
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create an API status error
    pub fn api_status(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiStatus {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }

    /// Record rejected before any backend call was made
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedRecordType(_) | Self::NameNotAllowed(_) | Self::InvalidInput(_)
        )
    }

    /// Failure talking to the backend, including non-ok API envelopes
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Http { .. } | Self::Json(_) | Self::ApiStatus { .. }
        )
    }

    /// Failure raised while building a provider
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
