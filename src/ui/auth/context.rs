//! Auth context shared by every page
//!
//! Wraps the [`ApiGateway`] in a reactive handle:
//! - `user` mirrors the cached profile in session storage
//! - `loading` and `error` drive the login form
//!
//! The gateway owns all session writes; this context only reflects them.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::config::Config;
use crate::core::error::ApiError;
use crate::core::gateway::{ApiGateway, DefaultTransport};
use crate::core::models::{Credentials, UserProfile};
use crate::core::session::{AuthManager, SessionStore};

/// Navigator used by the running application
#[cfg(not(feature = "ssr"))]
pub type ClientNavigator = crate::core::gateway::BrowserNavigator;

/// Navigator used by the running application
#[cfg(feature = "ssr")]
pub type ClientNavigator = crate::core::gateway::NoopNavigator;

/// Gateway type the views call the API through
pub type ClientGateway = ApiGateway<DefaultTransport, ClientNavigator>;

/// Auth context providing the gateway and the reactive session view
#[derive(Clone, Copy)]
pub struct AuthContext {
    gateway: StoredValue<Arc<ClientGateway>>,
    /// Signed-in user, if any
    pub user: RwSignal<Option<UserProfile>>,
    /// A login request is in flight
    pub loading: RwSignal<bool>,
    /// Message from the last failed login
    pub error: RwSignal<Option<String>>,
}

impl AuthContext {
    pub fn gateway(&self) -> Arc<ClientGateway> {
        self.gateway.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.get().is_some()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Sign in and publish the returned profile
    pub async fn login(&self, username: String, password: String) -> Result<UserProfile, ApiError> {
        self.loading.set(true);
        self.error.set(None);

        let gateway = self.gateway();
        let result = gateway
            .auth()
            .login(&Credentials::new(username, password))
            .await;

        match &result {
            Ok(user) => self.user.set(Some(user.clone())),
            Err(e) => {
                leptos::logging::warn!("Login failed: {}", e);
                self.error.set(Some(e.user_message()));
            }
        }
        self.loading.set(false);
        result
    }

    pub fn logout(&self) {
        self.gateway().auth().logout();
        self.user.set(None);
    }

    /// Reflect a failed API call; the gateway has already cleared storage
    /// when the session expired
    pub fn observe_error(&self, err: &ApiError) {
        if err.is_session_expired() {
            self.user.set(None);
        }
    }
}

fn session_store() -> SessionStore {
    #[cfg(not(feature = "ssr"))]
    {
        SessionStore::new(crate::core::session::LocalStorage)
    }
    #[cfg(feature = "ssr")]
    {
        SessionStore::in_memory()
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context(config: Config) -> AuthContext {
    let auth = AuthManager::new(Arc::new(DefaultTransport::new()), session_store(), config);
    let gateway = ApiGateway::new(Arc::new(auth), ClientNavigator::default());

    // Start signed out on both server and client to avoid hydration mismatch
    let ctx = AuthContext {
        gateway: StoredValue::new(Arc::new(gateway)),
        user: RwSignal::new(None),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
    };

    // Restore the cached profile once hydrated
    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| {
        let user = ctx.gateway.with_value(|gateway| gateway.auth().current_user());
        ctx.user.set(user);
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
