//! API gateway: the HTTP client every view talks to

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::error::ApiError;
use crate::core::gateway::middleware::{
    self, RequestContext, ResponseAction, attach_bearer, classify,
};
use crate::core::gateway::request::{ApiRequest, ApiResponse};
use crate::core::gateway::transport::Transport;
use crate::core::session::{AuthManager, RefreshFailure};

/// Sends the client to the login entry point when the session ends
pub trait Navigator: Send + Sync {
    fn redirect_to_login(&self, route: &str);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn redirect_to_login(&self, route: &str) {
        (**self).redirect_to_login(route)
    }
}

/// Navigator for contexts without a browser window (server rendering)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect_to_login(&self, route: &str) {
        tracing::debug!("Session ended; no browser to redirect to {}", route);
    }
}

/// Full-page navigation through `window.location`
#[cfg(not(feature = "ssr"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(not(feature = "ssr"))]
impl Navigator for BrowserNavigator {
    fn redirect_to_login(&self, route: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(route);
        }
    }
}

/// Attaches credentials to every call and recovers from an expired access
/// token at most once per request.
pub struct ApiGateway<T, N = NoopNavigator> {
    auth: Arc<AuthManager<T>>,
    navigator: N,
}

impl<T: Transport, N: Navigator> ApiGateway<T, N> {
    pub fn new(auth: Arc<AuthManager<T>>, navigator: N) -> Self {
        Self { auth, navigator }
    }

    pub fn auth(&self) -> &AuthManager<T> {
        &self.auth
    }

    /// Send a request through the bearer/refresh middleware.
    ///
    /// Non-401 failures come back untouched. A 401 triggers one refresh; if
    /// the retried request is rejected again the caller gets `Unauthorized`.
    /// A failed refresh ends the session and redirects to login, once even
    /// when several requests fail together.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut ctx = RequestContext::new();
        let mut token = self.auth.store().access_token();

        loop {
            let outgoing = attach_bearer(&request, token.as_deref());
            let response = self.dispatch(&outgoing, ctx).await?;

            match classify(&response, ctx) {
                ResponseAction::Complete => return middleware::into_result(response),
                ResponseAction::RefreshAndRetry(next) => {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        "{} {} unauthorized, refreshing access token",
                        request.method,
                        request.path
                    );
                    let refreshed = self.auth.refresh_for_retry(token.as_deref()).await;
                    match refreshed {
                        Ok(fresh) => {
                            token = Some(fresh);
                            ctx = next;
                        }
                        Err(RefreshFailure::Ended(e)) => {
                            self.redirect_to_login();
                            return Err(e);
                        }
                        // Whoever ended the session has already redirected
                        Err(RefreshFailure::AlreadyEnded(e)) => return Err(e),
                    }
                }
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        ctx: RequestContext,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.auth.config().endpoint(&request.path);
        tracing::debug!(
            request_id = %ctx.request_id,
            attempt = ctx.attempt(),
            "{} {}",
            request.method,
            url
        );
        self.auth.transport().execute(&url, request).await
    }

    /// The manager has already cleared the session at this point
    fn redirect_to_login(&self) {
        let route = &self.auth.config().login_route;
        tracing::info!("Session terminated, redirecting to {}", route);
        self.navigator.redirect_to_login(route);
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).json(body)?).await?.json()
    }

    pub async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send(ApiRequest::put(path).json(body)?).await?.json()
    }

    /// POST with no body, ignoring the response body
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::post(path)).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }
}
