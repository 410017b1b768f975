//! search-sync - Keeps a secondary search index consistent with a primary
//! datastore
//!
//! Library modules for the synchronization engine

pub mod datastore;
pub mod error;
pub mod index_service;
pub mod record;
pub mod registry;
pub mod sync;
