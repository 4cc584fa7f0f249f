//! Session/auth manager
//!
//! Owns the session lifecycle:
//! - `Anonymous -> Authenticated` on a successful login
//! - `Authenticated -> Authenticated` on a successful refresh
//! - `-> Anonymous` on logout or any failed refresh
//!
//! Refreshes are serialized behind a single async lock so that requests
//! rejected together share one refresh round-trip.

use std::sync::Arc;

use futures::lock::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::config::Config;
use crate::core::error::ApiError;
use crate::core::gateway::{ApiRequest, ApiResponse, Transport};
use crate::core::models::{Credentials, TokenPair, UserProfile};
use crate::core::session::SessionStore;

/// Authentication endpoint
pub const LOGIN_PATH: &str = "/login/";
/// Token refresh endpoint
pub const REFRESH_PATH: &str = "/login/refresh/";

/// Derived session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Login response body
#[derive(Debug, Deserialize)]
struct LoginResponse {
    access: String,
    refresh: String,
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

/// Refresh response body; `refresh` is only present when the server rotates it
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// Why a retry could not obtain a fresh access token
#[derive(Debug)]
pub(crate) enum RefreshFailure {
    /// This call failed to refresh and cleared the session
    Ended(ApiError),
    /// The session was already cleared while this call waited for the lock
    AlreadyEnded(ApiError),
}

impl RefreshFailure {
    pub(crate) fn into_error(self) -> ApiError {
        match self {
            RefreshFailure::Ended(e) | RefreshFailure::AlreadyEnded(e) => e,
        }
    }
}

/// Sole writer of the persisted session
pub struct AuthManager<T> {
    transport: Arc<T>,
    store: SessionStore,
    config: Config,
    refresh_lock: Mutex<()>,
}

impl<T: Transport> AuthManager<T> {
    pub fn new(transport: Arc<T>, store: SessionStore, config: Config) -> Self {
        Self {
            transport,
            store,
            config,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> SessionState {
        if self.store.has_session() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// Exchange credentials for a session.
    ///
    /// Nothing is persisted unless the whole response is valid.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        tracing::info!("Login attempt for user: {}", credentials.username);

        let request = ApiRequest::post(LOGIN_PATH).json(credentials)?;
        let response = self
            .transport
            .execute(&self.config.endpoint(LOGIN_PATH), &request)
            .await?;

        match response.status {
            200..=299 => {}
            400..=499 => {
                tracing::info!("Login rejected for user: {}", credentials.username);
                return Err(ApiError::InvalidCredentials);
            }
            status => return Err(ApiError::from_status(status, response.json_value())),
        }

        let body: LoginResponse = response.json()?;
        let tokens = TokenPair {
            access: body.access,
            refresh: body.refresh,
        };
        self.store.save_session(&tokens, &body.user)?;

        tracing::info!("User logged in: id={}", body.user.id);
        Ok(body.user)
    }

    /// Drop the local session. Needs no server acknowledgment.
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("Session cleared");
    }

    /// Cached profile of the signed-in user, without network access
    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.user()
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Any failure tears the session down and yields `SessionExpired`.
    pub async fn refresh(&self) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Refresh after the server rejected `rejected`.
    ///
    /// If another caller already replaced that token while we waited for the
    /// lock, its result is reused and no refresh request is sent.
    pub async fn refresh_after_rejection(&self, rejected: Option<&str>) -> Result<String, ApiError> {
        self.refresh_for_retry(rejected)
            .await
            .map_err(RefreshFailure::into_error)
    }

    /// Like [`Self::refresh_after_rejection`], but tells apart a teardown
    /// done by this call from one a concurrent request already did.
    pub(crate) async fn refresh_for_retry(
        &self,
        rejected: Option<&str>,
    ) -> Result<String, RefreshFailure> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.store.access_token();
        match current {
            Some(current) if Some(current.as_str()) != rejected => {
                tracing::debug!("Access token already refreshed by a concurrent request");
                Ok(current)
            }
            None if rejected.is_some() => {
                tracing::debug!("Session already ended by a concurrent request");
                Err(RefreshFailure::AlreadyEnded(ApiError::SessionExpired(
                    "session ended by a concurrent request".to_string(),
                )))
            }
            _ => self.refresh_locked().await.map_err(RefreshFailure::Ended),
        }
    }

    async fn refresh_locked(&self) -> Result<String, ApiError> {
        match self.request_refresh().await {
            Ok(access) => {
                tracing::debug!("Access token refreshed");
                Ok(access)
            }
            Err(e) => {
                tracing::warn!("Token refresh failed, ending session: {}", e);
                self.logout();
                Err(match e {
                    ApiError::SessionExpired(_) => e,
                    other => ApiError::SessionExpired(other.to_string()),
                })
            }
        }
    }

    async fn request_refresh(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .store
            .refresh_token()
            .ok_or_else(|| ApiError::SessionExpired("no refresh token stored".to_string()))?;

        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
            refresh: &refresh_token,
        })?;
        let response: ApiResponse = self
            .transport
            .execute(&self.config.endpoint(REFRESH_PATH), &request)
            .await?;

        if !response.is_success() {
            return Err(ApiError::from_status(response.status, response.json_value()));
        }

        let body: RefreshResponse = response.json()?;
        self.store.set_access_token(&body.access)?;
        if let Some(rotated) = body.refresh.as_deref() {
            self.store.set_refresh_token(rotated)?;
        }
        Ok(body.access)
    }
}
