//! Error types for the dnscf synchronizer
//!
//! Every fallible operation in the workspace returns [`Result`]. Per-record
//! update failures are not errors: they are reported through
//! [`UpdateStatus`](crate::traits::UpdateStatus) so one bad record never
//! aborts the batch.

use thiserror::Error;

/// Result type alias for dnscf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dnscf synchronizer
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single candidate fetch attempt failed
    #[error("Candidate source error: {0}")]
    Source(String),

    /// Every candidate fetch attempt failed
    #[error("Candidate source exhausted after {attempts} attempt(s): {last_error}")]
    SourceExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Description of the final failure
        last_error: String,
    },

    /// Fewer candidates than record slots to fill
    #[error("Insufficient candidates: {available} available, {required} required")]
    InsufficientCandidates {
        /// Total record slots across all hostnames
        required: usize,
        /// Candidates returned by the source
        available: usize,
    },

    /// Non-success status from a remote API
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or provider message
        message: String,
    },

    /// Transport-level HTTP failure (timeout, connection refused, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body that is not the expected JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a candidate source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create an API status error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
