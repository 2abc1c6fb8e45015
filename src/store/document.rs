//! # Documents, Filters and Write Batches

use serde_json::{Map, Value};

/// A flat JSON document as held by the store
pub type Document = Map<String, Value>;

/// Equality filter applied during a collection scan
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    /// Match documents whose `field` equals `value`
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// A document without the field never matches
    pub fn matches(&self, document: &Document) -> bool {
        document.get(&self.field) == Some(&self.value)
    }
}

/// A single staged full-document replace
#[derive(Debug, Clone, PartialEq)]
pub struct StagedWrite {
    pub collection: String,
    pub id: String,
    pub document: Document,
}

/// Writes staged for one atomic commit
///
/// Staging order is preserved; when the same key is staged twice the later
/// write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<StagedWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a full replace of `collection/id`
    pub fn set(&mut self, collection: impl Into<String>, id: impl Into<String>, document: Document) {
        self.writes.push(StagedWrite {
            collection: collection.into(),
            id: id.into(),
            document,
        });
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[StagedWrite] {
        &self.writes
    }

    pub fn into_writes(self) -> Vec<StagedWrite> {
        self.writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filter_matches_exact_value() {
        let filter = Filter::equals("destacada", true);
        assert!(filter.matches(&doc(json!({"destacada": true}))));
        assert!(!filter.matches(&doc(json!({"destacada": false}))));
        assert!(!filter.matches(&doc(json!({"destacada": "true"}))));
        assert!(!filter.matches(&doc(json!({"nombre": "Suite"}))));
    }

    #[test]
    fn test_batch_preserves_staging_order() {
        let mut batch = WriteBatch::new();
        assert!(batch.is_empty());

        batch.set("habitaciones", "b", Document::new());
        batch.set("habitaciones", "a", Document::new());

        assert_eq!(batch.len(), 2);
        let ids: Vec<_> = batch.writes().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
