//! Durable per-view operator preferences.
//!
//! The only preference this system persists is the chosen page size, one
//! scalar per view kind. The store is injected so the controller never
//! touches ambient storage directly and tests can substitute the in-memory
//! implementation. Writes are best-effort: a failing store must log and
//! carry on, never fail a user interaction.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::types::ViewKind;

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

/// Storage key for a view's page-size preference.
pub fn items_per_page_key(view: ViewKind) -> String {
    format!("{}.items_per_page", view.as_str())
}

/// Volatile store for tests and embedders without durable storage.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("preference map lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("preference map lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_view() {
        assert_eq!(items_per_page_key(ViewKind::Articles), "articles.items_per_page");
        assert_eq!(
            items_per_page_key(ViewKind::TheaterReleases),
            "theater_releases.items_per_page"
        );
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get("articles.items_per_page"), None);
        store.set("articles.items_per_page", "20");
        assert_eq!(store.get("articles.items_per_page"), Some("20".to_string()));
    }
}
