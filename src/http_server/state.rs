//! Shared handler state

use std::sync::Arc;

use subtle::ConstantTimeEq;

use crate::store::DocumentStore;

/// State shared by every handler, built once at startup
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    api_key: String,
    pub hero_placeholder_url: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        api_key: impl Into<String>,
        hero_placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            api_key: api_key.into(),
            hero_placeholder_url: hero_placeholder_url.into(),
        }
    }

    /// Exact, constant-time comparison against the configured secret.
    ///
    /// An unset secret never authorizes anything.
    pub fn is_authorized(&self, presented: Option<&[u8]>) -> bool {
        match presented {
            Some(key) if !self.api_key.is_empty() => {
                bool::from(key.ct_eq(self.api_key.as_bytes()))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn state(key: &str) -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), key, "https://example.com/hero.jpg")
    }

    #[test]
    fn test_authorization() {
        let state = state("casa_secret");
        assert!(state.is_authorized(Some("casa_secret".as_bytes())));
        assert!(!state.is_authorized(Some("casa_secret ".as_bytes())));
        assert!(!state.is_authorized(Some("CASA_SECRET".as_bytes())));
        assert!(!state.is_authorized(Some("".as_bytes())));
        assert!(!state.is_authorized(None));
    }

    #[test]
    fn test_empty_secret_rejects_everything() {
        let state = state("");
        assert!(!state.is_authorized(Some("".as_bytes())));
    }
}
