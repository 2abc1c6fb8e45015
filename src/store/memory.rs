//! # In-Memory Backend

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::backend::DocumentStore;
use super::document::{Document, Filter, WriteBatch};
use super::errors::{StoreError, StoreResult};

/// Collection name -> document key -> document
pub(crate) type Collections = BTreeMap<String, BTreeMap<String, Document>>;

/// Process-local store; scans return documents in ascending key order
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(collections.get(collection).map_or(0, BTreeMap::len))
    }
}

pub(crate) fn read_document(collections: &Collections, collection: &str, id: &str) -> Option<Document> {
    collections.get(collection).and_then(|docs| docs.get(id)).cloned()
}

pub(crate) fn scan_collection(
    collections: &Collections,
    collection: &str,
    filter: Option<&Filter>,
) -> Vec<(String, Document)> {
    let Some(docs) = collections.get(collection) else {
        return Vec::new();
    };

    docs.iter()
        .filter(|(_, doc)| filter.map_or(true, |f| f.matches(doc)))
        .map(|(id, doc)| (id.clone(), doc.clone()))
        .collect()
}

pub(crate) fn apply_batch(collections: &mut Collections, batch: WriteBatch) {
    for write in batch.into_writes() {
        collections
            .entry(write.collection)
            .or_default()
            .insert(write.id, write.document);
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(read_document(&collections, collection, id))
    }

    fn scan(&self, collection: &str, filter: Option<&Filter>) -> StoreResult<Vec<(String, Document)>> {
        let collections = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(scan_collection(&collections, collection, filter))
    }

    fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let mut batch = WriteBatch::new();
        batch.set(collection, id, document);
        self.commit(batch)
    }

    fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut collections = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        apply_batch(&mut collections, batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("settings", "home_page").unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_whole_document() {
        let store = MemoryStore::new();
        store
            .set("habitaciones", "r1", doc(json!({"nombre": "Suite", "camas": 2})))
            .unwrap();
        store
            .set("habitaciones", "r1", doc(json!({"nombre": "Doble"})))
            .unwrap();

        let stored = store.get("habitaciones", "r1").unwrap().unwrap();
        assert_eq!(stored, doc(json!({"nombre": "Doble"})));
    }

    #[test]
    fn test_scan_orders_by_key_and_filters() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.set("habitaciones", "c", doc(json!({"destacada": true})));
        batch.set("habitaciones", "a", doc(json!({"destacada": true})));
        batch.set("habitaciones", "b", doc(json!({"destacada": false})));
        store.commit(batch).unwrap();

        let all: Vec<_> = store
            .scan("habitaciones", None)
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(all, vec!["a", "b", "c"]);

        let featured: Vec<_> = store
            .scan("habitaciones", Some(&Filter::equals("destacada", true)))
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(featured, vec!["a", "c"]);
    }

    #[test]
    fn test_scan_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.scan("habitaciones", None).unwrap().is_empty());
        assert_eq!(store.count("habitaciones").unwrap(), 0);
    }

    #[test]
    fn test_later_staged_write_wins() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.set("habitaciones", "r1", doc(json!({"precio_noche": 100})));
        batch.set("habitaciones", "r1", doc(json!({"precio_noche": 200})));
        store.commit(batch).unwrap();

        let stored = store.get("habitaciones", "r1").unwrap().unwrap();
        assert_eq!(stored["precio_noche"], json!(200));
        assert_eq!(store.count("habitaciones").unwrap(), 1);
    }
}
