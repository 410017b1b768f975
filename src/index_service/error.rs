//! Index service error types
//!
//! Unified error type for index-service backends.

use thiserror::Error;

/// Errors that can occur against the index service
#[derive(Error, Debug)]
pub enum IndexServiceError {
    /// The service rejected a staged operation
    #[error("staging rejected: {0}")]
    Rejected(String),

    /// The service could not be reached
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Generic backend error
    #[error("backend error: {0}")]
    Backend(String),
}

impl IndexServiceError {
    /// Create a rejection error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Create an unavailability error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
