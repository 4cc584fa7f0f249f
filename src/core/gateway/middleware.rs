//! Request/response middleware around a single send.
//!
//! The gateway composes these around every outgoing call:
//! 1. [`attach_bearer`] stamps the current access token on the request.
//! 2. [`classify`] decides whether a response completes the request or
//!    needs one refresh-and-retry cycle.
//! 3. [`into_result`] turns the final response into the caller's result.
//!
//! The retry marker lives in a [`RequestContext`] value per logical request,
//! never on a shared object.

use uuid::Uuid;

use crate::core::error::ApiError;
use crate::core::gateway::request::{AUTHORIZATION, ApiRequest, ApiResponse};

/// Refresh-and-retry cycles allowed per logical request
pub const MAX_AUTH_RETRIES: u8 = 1;

/// Per-logical-request context threaded through the retry decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Uuid,
    attempt: u8,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            attempt: 0,
        }
    }

    pub fn attempt(&self) -> u8 {
        self.attempt
    }

    pub fn is_retry(&self) -> bool {
        self.attempt > 0
    }

    /// Context for the next attempt, or `None` once the retry budget is spent
    pub fn next_attempt(self) -> Option<Self> {
        (self.attempt < MAX_AUTH_RETRIES).then(|| Self {
            attempt: self.attempt + 1,
            ..self
        })
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseAction {
    /// Hand the response to [`into_result`]
    Complete,
    /// Refresh the access token, then re-send under the given context
    RefreshAndRetry(RequestContext),
}

/// Request phase: attach the access token as a bearer credential.
///
/// No expiry check happens here; expiry is only discovered through a 401.
pub fn attach_bearer(request: &ApiRequest, token: Option<&str>) -> ApiRequest {
    match token {
        Some(token) => request
            .clone()
            .header(AUTHORIZATION, format!("Bearer {}", token)),
        None => request.clone(),
    }
}

/// Response phase: only a 401 with retry budget left asks for a refresh
pub fn classify(response: &ApiResponse, ctx: RequestContext) -> ResponseAction {
    if !response.is_unauthorized() {
        return ResponseAction::Complete;
    }
    match ctx.next_attempt() {
        Some(next) => ResponseAction::RefreshAndRetry(next),
        None => ResponseAction::Complete,
    }
}

/// Final mapping of a response to the caller's result
pub fn into_result(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(response.status, response.json_value()))
    }
}
