//! Authenticated session.
//!
//! A [`Session`] is created at login and destroyed at logout. The
//! [`SessionHandle`] shares it between the command layer and the HTTP
//! adapter, which rotates tokens on refresh and ends the session when the
//! refresh is refused.

pub mod store;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use store::SessionStore;

use crate::ports::TokenPair;

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
}

/// Credentials for one logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Who is logged in.
    pub user: User,
    /// Bearer token for requests.
    pub access_token: String,
    /// Token used to renew `access_token`.
    pub refresh_token: String,
    /// When the session began.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Builds a session from a login response.
    #[must_use]
    pub fn new(user: User, tokens: TokenPair, started_at: DateTime<Utc>) -> Self {
        Self {
            user,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            started_at,
        }
    }
}

/// Shared, swappable slot for the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<Option<Session>>>,
}

impl SessionHandle {
    /// Creates a handle holding `session`.
    #[must_use]
    pub fn new(session: Option<Session>) -> Self {
        Self { inner: Arc::new(Mutex::new(session)) }
    }

    /// Starts a session, replacing any previous one.
    pub fn begin(&self, session: Session) {
        tracing::info!(user = %session.user.email, "session started");
        *self.lock() = Some(session);
    }

    /// Ends the session and returns it, if there was one.
    pub fn end(&self) -> Option<Session> {
        let ended = self.lock().take();
        if let Some(session) = &ended {
            tracing::info!(user = %session.user.email, "session ended");
        }
        ended
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.lock().clone()
    }

    /// Current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock().as_ref().map(|session| session.access_token.clone())
    }

    /// Swaps in a refreshed token pair. Returns `false` if no session is active.
    pub fn rotate(&self, tokens: TokenPair) -> bool {
        let mut guard = self.lock();
        let Some(session) = guard.as_mut() else {
            return false;
        };
        session.access_token = tokens.access_token;
        session.refresh_token = tokens.refresh_token;
        tracing::debug!(user = %session.user.email, "tokens rotated");
        true
    }

    /// Returns `true` while someone is logged in.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.inner.lock().expect("session lock poisoned")
    }
}
