//! # Session store — persisted identity over a key/value backend
//!
//! [`SessionStore`] reads and writes the four session fields (token, role,
//! username, CID) through any [`KeyValueStore`]. On the web the backend is
//! the browser's `localStorage` ([`crate::LocalStore`]); tests and native
//! builds use [`crate::MemoryStore`].
//!
//! Fields are stored independently, so a partially written session reads back
//! with empty strings in place of the missing fields.
//!
//! [`SessionStore::require_role`] is the page guard used by the dashboards. It
//! only decides whether the UI should show a page; every request is still
//! authorized by the backend from the bearer token.

use crate::config::StorageConfig;
use crate::models::{Role, Session};

/// Synchronous string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    /// Remove every entry held by the store.
    fn clear(&self);
}

/// Outcome of a page role check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Granted(Session),
    /// No token, or a role other than the page's. The UI sends the user to login.
    Denied,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }
}

/// Storage keys for each session field.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SessionKeys {
    token: String,
    role: String,
    username: String,
    cid: String,
}

impl SessionKeys {
    fn with_prefix(prefix: &str) -> Self {
        Self {
            token: format!("{prefix}token"),
            role: format!("{prefix}role"),
            username: format!("{prefix}user"),
            cid: format!("{prefix}cid"),
        }
    }
}

/// Session persistence on top of a [`KeyValueStore`].
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    keys: SessionKeys,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Use the default `med_` key prefix.
    pub fn new(store: S) -> Self {
        Self::with_config(store, &StorageConfig::default())
    }

    pub fn with_config(store: S, config: &StorageConfig) -> Self {
        Self {
            store,
            keys: SessionKeys::with_prefix(&config.key_prefix),
        }
    }

    /// Persist every field of the session.
    pub fn save(&self, session: &Session) {
        self.store.set(&self.keys.token, &session.token);
        self.store.set(&self.keys.role, &session.role);
        self.store.set(&self.keys.username, &session.username);
        self.store.set(&self.keys.cid, &session.cid);
    }

    /// Read the session, defaulting each missing field to an empty string.
    pub fn read(&self) -> Session {
        let field = |key: &str| self.store.get(key).unwrap_or_default();
        Session {
            token: field(&self.keys.token),
            role: field(&self.keys.role),
            username: field(&self.keys.username),
            cid: field(&self.keys.cid),
        }
    }

    /// Drop all persisted state (logout).
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Check the stored session against the role a page requires.
    pub fn require_role(&self, expected: Role) -> Access {
        let session = self.read();
        if !session.has_token() || session.role != expected.as_str() {
            tracing::debug!(expected = %expected, "role gate denied page access");
            return Access::Denied;
        }
        Access::Granted(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn patient() -> Session {
        Session {
            token: "tok-123".to_string(),
            role: "patient".to_string(),
            username: "Ada".to_string(),
            cid: "CID-0001".to_string(),
        }
    }

    #[test]
    fn test_save_and_read() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&patient());
        assert_eq!(sessions.read(), patient());
    }

    #[test]
    fn test_read_tolerates_missing_fields() {
        let store = MemoryStore::new();
        store.set("med_token", "tok");
        let sessions = SessionStore::new(store);

        let session = sessions.read();
        assert_eq!(session.token, "tok");
        assert_eq!(session.role, "");
        assert_eq!(session.username, "");
        assert_eq!(session.cid, "");
    }

    #[test]
    fn test_keys_follow_prefix() {
        let store = MemoryStore::new();
        let config = StorageConfig {
            key_prefix: "qa_".to_string(),
        };
        let sessions = SessionStore::with_config(store.clone(), &config);
        sessions.save(&patient());

        assert_eq!(store.get("qa_token").as_deref(), Some("tok-123"));
        assert_eq!(store.get("qa_user").as_deref(), Some("Ada"));
        assert!(store.get("med_token").is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = MemoryStore::new();
        store.set("unrelated", "value");
        let sessions = SessionStore::new(store.clone());
        sessions.save(&patient());

        sessions.clear();

        assert_eq!(sessions.read(), Session::default());
        assert!(store.get("unrelated").is_none());
    }

    #[test]
    fn test_require_role_grants_matching_role() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&patient());
        assert_eq!(sessions.require_role(Role::Patient), Access::Granted(patient()));
    }

    #[test]
    fn test_require_role_denies_other_role() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&patient());
        assert_eq!(sessions.require_role(Role::Hospital), Access::Denied);
    }

    #[test]
    fn test_require_role_denies_without_token() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&Session {
            token: String::new(),
            ..patient()
        });
        assert_eq!(sessions.require_role(Role::Patient), Access::Denied);

        let empty = SessionStore::new(MemoryStore::new());
        assert_eq!(empty.require_role(Role::Patient), Access::Denied);
        assert_eq!(empty.require_role(Role::Hospital), Access::Denied);
    }

    #[test]
    fn test_require_role_denies_unknown_role() {
        let sessions = SessionStore::new(MemoryStore::new());
        sessions.save(&Session {
            role: "admin".to_string(),
            ..patient()
        });
        assert!(!sessions.require_role(Role::Hospital).is_granted());
        assert!(!sessions.require_role(Role::Patient).is_granted());
    }
}
