//! Session Store
//!
//! Single source of truth for who is logged in. The record lives in a
//! watch channel so views can observe every change; each auth operation
//! ends with one assignment of the whole record followed by persistence.
//!
//! Anonymous --login--> Authenticated --logout / failed refresh--> Anonymous

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};

use crate::authz::{self, ResourceKind};
use crate::error::{server_message, ApiResult};
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::models::{LoginRequest, LoginResponse, RefreshRequest, TokenPair, User};
use crate::storage::SessionStorage;

pub const LOGIN_PATH: &str = "/otentikasi/masuk";
pub const LOGOUT_PATH: &str = "/otentikasi/keluar";
pub const REFRESH_PATH: &str = "/otentikasi/segarkan";

/// Message returned when a rejected login carries no server message
pub const LOGIN_FAILED: &str = "Login failed";

/// Authenticated user and token pair. Serialized field names match the
/// persisted record: `user`, `token`, `refreshToken`, `isAuthenticated`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub user: Option<User>,
    #[serde(rename = "token")]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticated,
}

impl Session {
    pub fn authenticated(user: User, access_token: String, refresh_token: Option<String>) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token,
            is_authenticated: true,
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_authenticated && self.access_token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}

/// Result of a login attempt that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    Rejected { message: String },
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<Session>,
    /// Held while a refresh is in flight so concurrent 401s share one refresh
    refresh_gate: Mutex<()>,
}

impl SessionStore {
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            inner: Arc::new(Inner {
                transport,
                storage,
                state,
                refresh_gate: Mutex::new(()),
            }),
        }
    }

    /// Rehydrate the persisted record. Returns whether a session was restored.
    pub fn restore(&self) -> bool {
        match self.inner.storage.load() {
            Some(session) if session.status() == SessionStatus::Authenticated => {
                log::info!("Restored session for {}", session.user.as_ref().map(|u| u.email.as_str()).unwrap_or("unknown user"));
                self.inner.state.send_replace(session);
                true
            }
            Some(_) => {
                self.inner.storage.clear();
                false
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        self.inner.state.borrow().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.state.borrow().access_token.clone()
    }

    pub fn has_refresh_token(&self) -> bool {
        self.inner.state.borrow().refresh_token.is_some()
    }

    /// Rejections (any HTTP status) come back as `LoginOutcome::Rejected`;
    /// only transport and decode failures are errors.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        let request = ApiRequest::post(LOGIN_PATH).json(&LoginRequest { email, password })?;
        let response = self.inner.transport.execute(&request, None).await?;

        if !response.is_success() {
            log::info!("Login rejected with HTTP {}", response.status);
            let message = server_message(&response.body).unwrap_or_else(|| LOGIN_FAILED.to_string());
            return Ok(LoginOutcome::Rejected { message });
        }

        let body: LoginResponse = response.decode()?;
        log::info!("Signed in as {}", body.user.email);
        self.replace(Session::authenticated(body.user, body.access_token, body.refresh_token));
        Ok(LoginOutcome::Authenticated)
    }

    /// Notify the server, then clear local state whatever the outcome
    pub async fn logout(&self) {
        let token = self.access_token();
        match self.inner.transport.execute(&ApiRequest::post(LOGOUT_PATH), token.as_deref()).await {
            Ok(response) if response.is_success() => log::info!("Signed out"),
            Ok(response) => log::warn!("Logout notification returned HTTP {}", response.status),
            Err(e) => log::warn!("Logout notification failed: {}", e),
        }
        self.clear();
    }

    /// Exchange the refresh token for a new pair. Any failure ends the session.
    pub async fn refresh_access_token(&self) -> bool {
        let stored = self.inner.state.borrow().refresh_token.clone();
        let Some(refresh_token) = stored else {
            log::warn!("No refresh token stored, signing out");
            self.logout().await;
            return false;
        };

        match self.request_token_pair(&refresh_token).await {
            Ok(pair) => {
                let mut session = self.snapshot();
                session.access_token = Some(pair.access_token);
                if pair.refresh_token.is_some() {
                    session.refresh_token = pair.refresh_token;
                }
                self.replace(session);
                log::info!("Access token refreshed");
                true
            }
            Err(e) => {
                log::warn!("Token refresh failed: {}", e);
                self.logout().await;
                false
            }
        }
    }

    /// Refresh on behalf of a request rejected while carrying `rejected_token`.
    ///
    /// Callers queue on the refresh gate; whoever gets it first refreshes.
    /// Later callers see the token already changed and reuse the result.
    pub async fn refresh_after_rejection(&self, rejected_token: Option<&str>) -> bool {
        let _gate = self.inner.refresh_gate.lock().await;
        if !self.is_authenticated() {
            return false;
        }
        if self.access_token().as_deref() != rejected_token {
            log::debug!("Access token already refreshed by a concurrent request");
            return true;
        }
        self.refresh_access_token().await
    }

    pub fn has_role(&self, code: &str) -> bool {
        authz::has_role(self.inner.state.borrow().user.as_ref(), &[code])
    }

    pub fn has_permission(&self, code: &str) -> bool {
        authz::has_permission(self.inner.state.borrow().user.as_ref(), &[code])
    }

    pub fn can_delete(&self, kind: ResourceKind) -> bool {
        authz::can_delete(self.inner.state.borrow().user.as_ref(), kind)
    }

    pub fn can_create(&self, kind: ResourceKind) -> bool {
        authz::can_create(self.inner.state.borrow().user.as_ref(), kind)
    }

    pub fn can_update(&self, kind: ResourceKind) -> bool {
        authz::can_update(self.inner.state.borrow().user.as_ref(), kind)
    }

    pub fn is_admin(&self) -> bool {
        authz::is_admin(self.inner.state.borrow().user.as_ref())
    }

    async fn request_token_pair(&self, refresh_token: &str) -> ApiResult<TokenPair> {
        let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest { refresh_token })?;
        let response: ApiResponse = self.inner.transport.execute(&request, None).await?;
        response.decode()
    }

    fn replace(&self, session: Session) {
        self.inner.storage.save(&session);
        self.inner.state.send_replace(session);
    }

    fn clear(&self) {
        self.inner.storage.clear();
        self.inner.state.send_replace(Session::default());
    }
}
