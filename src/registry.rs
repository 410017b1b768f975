//! Indexable type registration
//!
//! Maps a record-type identifier to its indexing configuration: the
//! primary-key column used for cursor pagination, default eager-load hints,
//! and the attribute names extracted into index documents. The registry is
//! populated once at startup and read by every other component.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::record::Record;

/// Primary-key column assumed when a type does not override it.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Indexing configuration for one record type.
///
/// Immutable after registration.
#[derive(Debug, Clone)]
pub struct IndexableType {
    /// Record-type identifier, e.g. `"posts"`.
    pub name: String,
    /// Primary-key column, forwarded to datastore page requests as the
    /// ordering column.
    pub primary_key: String,
    /// Eager-load hints applied when a reindex does not specify its own.
    /// Opaque to the engine.
    pub default_include: Vec<String>,
    /// Attribute names extracted into the index document, in order.
    pub attributes: Vec<String>,
}

impl IndexableType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            default_include: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Override the primary-key column.
    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = column.into();
        self
    }

    /// Set the default eager-load hints.
    pub fn with_include<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_include = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the extracted attribute names.
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Build the attribute snapshot staged for a record.
    ///
    /// Attributes the record does not carry are omitted from the snapshot.
    pub fn snapshot(&self, record: &Record) -> Map<String, Value> {
        let mut attributes = Map::new();
        for name in &self.attributes {
            if let Some(value) = record.attribute(name) {
                attributes.insert(name.clone(), value.clone());
            }
        }
        attributes
    }
}

/// Process-wide table of registered indexable types.
///
/// Built once via [`IndexableRegistry::builder`] and shared by `Arc`; there
/// is no registration after `build`, so lookups take no lock.
#[derive(Debug, Default)]
pub struct IndexableRegistry {
    types: HashMap<String, Arc<IndexableType>>,
}

impl IndexableRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Configuration for a registered type, if any.
    pub fn get(&self, name: &str) -> Option<&Arc<IndexableType>> {
        self.types.get(name)
    }

    /// True iff `name` has a registration. Pure lookup, never fails.
    pub fn is_registered(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builder collecting registrations before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: HashMap<String, Arc<IndexableType>>,
}

impl RegistryBuilder {
    /// Register a type. A later registration for the same name replaces the
    /// earlier one.
    pub fn register(mut self, ty: IndexableType) -> Self {
        self.types.insert(ty.name.clone(), Arc::new(ty));
        self
    }

    pub fn build(self) -> IndexableRegistry {
        IndexableRegistry { types: self.types }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_defaults() {
        let ty = IndexableType::new("posts");

        assert_eq!(ty.name, "posts");
        assert_eq!(ty.primary_key, "id");
        assert!(ty.default_include.is_empty());
        assert!(ty.attributes.is_empty());
    }

    #[test]
    fn test_type_overrides() {
        let ty = IndexableType::new("authors")
            .with_primary_key("writer_id")
            .with_include(["address"])
            .with_attributes(["name"]);

        assert_eq!(ty.primary_key, "writer_id");
        assert_eq!(ty.default_include, vec!["address".to_string()]);
        assert_eq!(ty.attributes, vec!["name".to_string()]);
    }

    #[test]
    fn test_snapshot_extracts_registered_attributes_only() {
        let ty = IndexableType::new("posts").with_attributes(["title", "body"]);
        let record = Record::new(1)
            .with_attribute("title", "Hello")
            .with_attribute("secret", "hidden");

        let snapshot = ty.snapshot(&record);

        assert_eq!(snapshot.get("title"), Some(&serde_json::json!("Hello")));
        assert!(!snapshot.contains_key("secret"));
        // "body" is registered but absent on the record
        assert!(!snapshot.contains_key("body"));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = IndexableRegistry::builder()
            .register(IndexableType::new("posts"))
            .build();

        assert!(registry.is_registered("posts"));
        assert!(!registry.is_registered("blogs"));
        assert_eq!(registry.get("posts").unwrap().name, "posts");
        assert!(registry.get("blogs").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_replaces_duplicate_registration() {
        let registry = IndexableRegistry::builder()
            .register(IndexableType::new("posts"))
            .register(IndexableType::new("posts").with_primary_key("post_id"))
            .build();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("posts").unwrap().primary_key, "post_id");
    }
}
