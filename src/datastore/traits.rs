//! Datastore backend trait definition
//!
//! The authoritative record store the index is synchronized against. The
//! engine only ever counts, pages, probes existence, and loads by id;
//! everything else about the datastore is opaque.

use async_trait::async_trait;

use super::error::DatastoreError;
use super::PageRequest;
use crate::record::{Record, RecordId};

/// Trait for primary-datastore backends
#[async_trait]
pub trait DatastoreBackend: Send + Sync {
    /// Number of records of a type.
    async fn count(&self, type_name: &str) -> Result<usize, DatastoreError>;

    /// Fetch one page of records ordered ascending by primary key.
    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Record>, DatastoreError>;

    /// Whether a record with this identifier exists.
    async fn exists(&self, type_name: &str, id: RecordId) -> Result<bool, DatastoreError>;

    /// Load the living records for `ids`, preserving input order.
    /// Identifiers with no backing record are skipped.
    async fn load(&self, type_name: &str, ids: &[RecordId]) -> Result<Vec<Record>, DatastoreError>;
}
