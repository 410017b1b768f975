//! Datastore error types

use thiserror::Error;

/// Errors that can occur against the primary datastore
#[derive(Error, Debug)]
pub enum DatastoreError {
    /// Query execution failed
    #[error("query failed: {0}")]
    Query(String),

    /// Failed to connect to the datastore
    #[error("connection failed: {0}")]
    Connection(String),

    /// Generic backend error
    #[error("backend error: {0}")]
    Backend(String),
}

impl DatastoreError {
    /// Create a query error
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
