//! # Homepage Settings
//!
//! Singleton document `settings/home_page` holding the hero image URL.

use serde_json::Value;
use tracing::info;

use crate::store::{Document, DocumentStore, StoreError, StoreResult};

pub const SETTINGS_COLLECTION: &str = "settings";
pub const HOME_PAGE_KEY: &str = "home_page";

/// Hero image used when no settings document exists yet
pub const DEFAULT_HERO_IMAGE_URL: &str = "https://via.placeholder.com/1500";

/// Default settings document
pub fn default_home_page(image_url: &str) -> Document {
    let mut doc = Document::new();
    doc.insert("imageUrl".to_string(), Value::String(image_url.to_string()));
    doc
}

/// Read the settings document, creating it with `default_image_url` first
/// if it does not exist.
///
/// After creating the default the document is read back from the store, so
/// the caller always sees what was persisted.
pub fn load_or_create_home_page(store: &dyn DocumentStore, default_image_url: &str) -> StoreResult<Document> {
    if let Some(doc) = store.get(SETTINGS_COLLECTION, HOME_PAGE_KEY)? {
        return Ok(doc);
    }

    store.set(SETTINGS_COLLECTION, HOME_PAGE_KEY, default_home_page(default_image_url))?;
    let created = store.get(SETTINGS_COLLECTION, HOME_PAGE_KEY)?.ok_or_else(|| {
        StoreError::Serialization(format!(
            "{}/{} missing after write",
            SETTINGS_COLLECTION, HOME_PAGE_KEY
        ))
    })?;

    info!(event = "HOME_PAGE_DEFAULT_CREATED", image_url = default_image_url, "created default home page settings");
    Ok(created)
}

/// Hero image value of a settings document
pub fn hero_image(doc: &Document) -> Option<Value> {
    doc.get("imageUrl").cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_creates_default_once() {
        let store = MemoryStore::new();

        let first = load_or_create_home_page(&store, DEFAULT_HERO_IMAGE_URL).unwrap();
        assert_eq!(hero_image(&first), Some(json!(DEFAULT_HERO_IMAGE_URL)));
        assert!(store.get(SETTINGS_COLLECTION, HOME_PAGE_KEY).unwrap().is_some());

        let second = load_or_create_home_page(&store, "https://example.com/other.jpg").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_document_is_used_as_is() {
        let store = MemoryStore::new();
        let mut doc = default_home_page("https://cdn.example.com/hero.webp");
        doc.insert("titulo".to_string(), json!("Bienvenidos"));
        store.set(SETTINGS_COLLECTION, HOME_PAGE_KEY, doc.clone()).unwrap();

        let loaded = load_or_create_home_page(&store, DEFAULT_HERO_IMAGE_URL).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_hero_image_absent() {
        assert_eq!(hero_image(&Document::new()), None);
    }
}
