//! Session/auth lifecycle: persisted token pair and user profile, login,
//! logout and token refresh

mod manager;
mod store;

pub(crate) use manager::RefreshFailure;
pub use manager::{AuthManager, LOGIN_PATH, REFRESH_PATH, SessionState};
#[cfg(not(feature = "ssr"))]
pub use store::LocalStorage;
pub use store::{
    ACCESS_TOKEN_KEY, MemoryStorage, REFRESH_TOKEN_KEY, SessionStore, StorageBackend,
    StorageError, USER_DATA_KEY,
};
