//! # Document Store Trait

use super::document::{Document, Filter, WriteBatch};
use super::errors::StoreResult;

/// Minimal document store contract the request handlers depend on
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Fetch a document by key
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// List `(id, document)` pairs in store order, optionally filtered
    fn scan(&self, collection: &str, filter: Option<&Filter>) -> StoreResult<Vec<(String, Document)>>;

    /// Full replace of a single document
    fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Apply every staged write, or none of them
    fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}
