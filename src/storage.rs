//! Credential storage boundary.
//!
//! The session layer persists the bearer credential and the last
//! authenticated username through this trait; the host application supplies
//! the real backend (platform keychain, preferences file, …). An in-memory
//! implementation is provided for tests and for hosts without durable
//! storage.

use std::collections::HashMap;
use std::sync::RwLock;

/// Key-value store used to persist the bearer credential and username across
/// process restarts.
pub trait CredentialStore: Send + Sync {
    /// Fetch the current value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Set or clear the value for `key`. `None` removes the entry.
    fn set(&self, key: &str, value: Option<String>);
}

/// Process-local store backed by a `RwLock`ed map.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().expect("store lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: Option<String>) {
        let mut entries = self.entries.write().expect("store lock poisoned");
        match value {
            Some(v) => {
                entries.insert(key.to_string(), v);
            }
            None => {
                entries.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = MemoryStore::new();
        store.set("session.credential", Some("abc".into()));
        assert_eq!(store.get("session.credential").as_deref(), Some("abc"));
    }

    #[test]
    fn setting_none_clears_the_entry() {
        let store = MemoryStore::new();
        store.set("k", Some("v".into()));
        store.set("k", None);
        assert_eq!(store.get("k"), None);
    }
}
