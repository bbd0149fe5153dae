//! Authentication service port.

use serde::{Deserialize, Serialize};

use super::tasks::ApiFuture;
use crate::session::Session;

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Bearer token attached to every request.
    pub access_token: String,
    /// Token used to obtain the next pair.
    pub refresh_token: String,
}

/// Issues and renews credentials.
pub trait AuthApi: Send + Sync {
    /// Logs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected.
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> ApiFuture<'a, Session>;

    /// Registers a new account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected.
    fn signup<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> ApiFuture<'a, Session>;

    /// Exchanges the session's refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token is no longer accepted.
    fn refresh<'a>(&'a self, session: &'a Session) -> ApiFuture<'a, TokenPair>;
}

impl<T: AuthApi + ?Sized> AuthApi for std::sync::Arc<T> {
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> ApiFuture<'a, Session> {
        (**self).login(email, password)
    }

    fn signup<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> ApiFuture<'a, Session> {
        (**self).signup(name, email, password)
    }

    fn refresh<'a>(&'a self, session: &'a Session) -> ApiFuture<'a, TokenPair> {
        (**self).refresh(session)
    }
}
