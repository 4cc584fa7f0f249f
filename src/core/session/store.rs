//! Persisted session state
//!
//! Three named slots hold the session: access token, refresh token and the
//! serialized user profile. They are written and cleared as a set through
//! [`SessionStore`]; nothing else touches the backend directly.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;

use crate::core::models::{TokenPair, UserProfile};

/// Slot holding the access token
pub const ACCESS_TOKEN_KEY: &str = "authToken";
/// Slot holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Slot holding the JSON-serialized user profile
pub const USER_DATA_KEY: &str = "userData";

const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_DATA_KEY];

/// Storage backend errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("failed to serialize session data: {0}")]
    Serialize(String),
}

/// Key/value string storage the session lives in
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-process storage, used for server-side rendering and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.slots.remove(key);
    }
}

/// Browser `localStorage`
#[cfg(not(feature = "ssr"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

#[cfg(not(feature = "ssr"))]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(not(feature = "ssr"))]
impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Handle to the persisted session. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn access_token(&self) -> Option<String> {
        self.backend.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.backend.get(REFRESH_TOKEN_KEY)
    }

    /// Both tokens, if both are present
    pub fn tokens(&self) -> Option<TokenPair> {
        Some(TokenPair {
            access: self.access_token()?,
            refresh: self.refresh_token()?,
        })
    }

    /// Cached user profile; `None` if absent or unparsable
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.backend.get(USER_DATA_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("Ignoring unparsable stored user profile: {}", e);
                None
            }
        }
    }

    pub fn has_session(&self) -> bool {
        self.tokens().is_some()
    }

    /// Persist a fresh session. Either all three slots are written or none are.
    pub fn save_session(&self, tokens: &TokenPair, user: &UserProfile) -> Result<(), StorageError> {
        let user_json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;

        let _guard = self.lock_writes();
        let writes = [
            (ACCESS_TOKEN_KEY, tokens.access.as_str()),
            (REFRESH_TOKEN_KEY, tokens.refresh.as_str()),
            (USER_DATA_KEY, user_json.as_str()),
        ];
        for (key, value) in writes {
            if let Err(e) = self.backend.set(key, value) {
                self.clear_locked();
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn set_access_token(&self, token: &str) -> Result<(), StorageError> {
        let _guard = self.lock_writes();
        self.backend.set(ACCESS_TOKEN_KEY, token)
    }

    pub fn set_refresh_token(&self, token: &str) -> Result<(), StorageError> {
        let _guard = self.lock_writes();
        self.backend.set(REFRESH_TOKEN_KEY, token)
    }

    /// Remove all session slots
    pub fn clear(&self) {
        let _guard = self.lock_writes();
        self.clear_locked();
    }

    fn clear_locked(&self) {
        for key in SESSION_KEYS {
            self.backend.remove(key);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_session", &self.has_session())
            .finish()
    }
}
