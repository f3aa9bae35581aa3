use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::session::KeyValueStore;

/// In-memory KeyValueStore for testing and native fallback.
///
/// Clones share the same map, so a test can keep a handle to inspect what a
/// [`crate::SessionStore`] wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("med_role", "hospital");
        assert_eq!(store.get("med_role").as_deref(), Some("hospital"));

        store.set("med_role", "patient");
        assert_eq!(store.get("med_role").as_deref(), Some("patient"));
        assert_eq!(store.len(), 1);

        store.remove("med_role");
        assert!(store.get("med_role").is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("med_cid", "CID-9");
        assert_eq!(other.get("med_cid").as_deref(), Some("CID-9"));

        other.clear();
        assert!(store.is_empty());
    }
}
