//! # Rooms
//!
//! Room documents live in the `habitaciones` collection keyed by their id.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::normalize::{document_key, is_truthy, normalize_room};
use crate::store::{Document, DocumentStore, Filter, StoreResult, WriteBatch};

pub const ROOMS_COLLECTION: &str = "habitaciones";

/// Merge the document key into the stored fields as `id`.
///
/// A stored `id` field, when present, takes precedence over the key.
pub fn with_id(id: String, stored: Document) -> Document {
    let mut merged = Document::new();
    merged.insert("id".to_string(), Value::String(id));
    merged.extend(stored);
    merged
}

/// All rooms, or only those with `destacada == true`
pub fn list_rooms(store: &dyn DocumentStore, featured_only: bool) -> StoreResult<Vec<Document>> {
    let filter = featured_only.then(|| Filter::equals("destacada", true));
    let rooms = store
        .scan(ROOMS_COLLECTION, filter.as_ref())?
        .into_iter()
        .map(|(id, doc)| with_id(id, doc))
        .collect();
    Ok(rooms)
}

/// A single room by id
pub fn find_room(store: &dyn DocumentStore, id: &str) -> StoreResult<Option<Document>> {
    Ok(store
        .get(ROOMS_COLLECTION, id)?
        .map(|doc| with_id(id.to_string(), doc)))
}

/// Availability flag of a stored room; absent or null means available.
///
/// The map is typed `bool`, so a non-boolean value written outside the
/// upsert path is reported by its truthiness: a stored `"no"` reads as
/// available.
pub fn availability_of(doc: &Document) -> bool {
    match doc.get("disponible") {
        None | Some(Value::Null) => true,
        Some(value) => is_truthy(value),
    }
}

/// Room id -> availability for every stored room
pub fn availability(store: &dyn DocumentStore) -> StoreResult<BTreeMap<String, bool>> {
    Ok(store
        .scan(ROOMS_COLLECTION, None)?
        .into_iter()
        .map(|(id, doc)| {
            let available = availability_of(&doc);
            (id, available)
        })
        .collect())
}

/// Normalize every keyed record and stage it as a full replace.
///
/// Records that are not objects or have no usable id are skipped.
pub fn stage_upserts(records: &[Value]) -> WriteBatch {
    let mut batch = WriteBatch::new();
    for record in records.iter().filter_map(Value::as_object) {
        if let Some(id) = document_key(record) {
            batch.set(ROOMS_COLLECTION, id, normalize_room(record));
        }
    }
    batch
}

/// Stage and atomically commit `records`; returns how many were written
pub fn upsert_rooms(store: &dyn DocumentStore, records: &[Value]) -> StoreResult<usize> {
    let batch = stage_upserts(records);
    let written = batch.len();
    store.commit(batch)?;
    Ok(written)
}
