//! Record view of a primary-datastore entity
//!
//! The engine never owns records. It reads identifiers and attribute values
//! through this snapshot type; everything else about a record belongs to the
//! datastore.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable primary-key identifier of a datastore record.
pub type RecordId = u64;

/// A datastore entity as seen by the synchronization engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    id: RecordId,
    attributes: Map<String, Value>,
}

impl Record {
    /// Create a record with no attributes.
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
    }

    /// Set an attribute value, replacing any previous value for the name.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Look up one attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let record = Record::new(7)
            .with_attribute("title", "First Post")
            .with_attribute("views", 12u64);

        assert_eq!(record.id(), 7);
        assert_eq!(record.attribute("title"), Some(&Value::from("First Post")));
        assert_eq!(record.attribute("views"), Some(&Value::from(12u64)));
        assert_eq!(record.attribute("missing"), None);
    }

    #[test]
    fn test_with_attribute_replaces() {
        let record = Record::new(1)
            .with_attribute("title", "Draft")
            .with_attribute("title", "Final");

        assert_eq!(record.attribute("title"), Some(&Value::from("Final")));
        assert_eq!(record.attributes().len(), 1);
    }
}
