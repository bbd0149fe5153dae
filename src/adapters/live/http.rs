//! Live adapter for the `TaskApi` and `AuthApi` ports over the task service's REST API.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::board::{NewTask, TaskRecord};
use crate::drag::RemoteMoveRequest;
use crate::error::ApiError;
use crate::ports::{ApiFuture, AuthApi, Clock, TaskApi, TokenPair};
use crate::session::{Session, SessionHandle, User};

const FALLBACK_MESSAGE: &str = "Something went wrong!";

/// HTTP client for the task service.
///
/// Task requests carry the session's bearer token. A `401` or `403` triggers
/// one refresh; if the refresh succeeds the request is retried once with the
/// new token, otherwise the session is ended and the caller must log in again.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    session: SessionHandle,
    clock: Arc<dyn Clock>,
}

impl HttpApi {
    /// Creates a client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, session: SessionHandle, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            clock,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn request(
        &self,
        method: &Method,
        endpoint: &str,
        token: &str,
        body: Option<&Value>,
    ) -> RequestBuilder {
        let builder = self.client.request(method.clone(), self.url(endpoint)).bearer_auth(token);
        match body {
            Some(body) => builder.json(body),
            None => builder,
        }
    }

    async fn authorized<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let token = self.session.access_token().ok_or(ApiError::LoginRequired)?;
        tracing::info!(%method, endpoint, "task service request");

        let mut response = self.request(&method, endpoint, &token, body.as_ref()).send().await?;
        if is_auth_rejection(response.status()) {
            tracing::debug!(status = response.status().as_u16(), "access token rejected");
            let Some(token) = self.refresh_session().await else {
                self.session.end();
                return Err(ApiError::LoginRequired);
            };
            response = self.request(&method, endpoint, &token, body.as_ref()).send().await?;
        }
        decode(response).await
    }

    async fn unauthenticated<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Value,
    ) -> Result<Envelope<T>, ApiError> {
        tracing::info!(endpoint, "auth service request");
        let response = self.client.post(self.url(endpoint)).json(body).send().await?;
        decode(response).await
    }

    async fn refresh_session(&self) -> Option<String> {
        let session = self.session.snapshot()?;
        match self.refresh(&session).await {
            Ok(tokens) => {
                let access = tokens.access_token.clone();
                self.session.rotate(tokens).then_some(access)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed");
                None
            }
        }
    }

    fn start_session(&self, data: Option<LoginData>) -> Result<Session, ApiError> {
        let data = data.ok_or_else(|| ApiError::Decode("login response carried no data".into()))?;
        Ok(Session::new(data.user, data.tokens, self.clock.now()))
    }
}

/// Standard `{ statusCode, message, data }` response wrapper.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

impl<T> Envelope<T> {
    fn require(self, what: &str) -> Result<T, ApiError> {
        self.data.ok_or_else(|| ApiError::Decode(format!("{what} response carried no data")))
    }
}

/// Payload of a login or signup response.
#[derive(Deserialize)]
struct LoginData {
    user: User,
    tokens: TokenPair,
}

/// Body of a failed response.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn is_auth_rejection(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Returns the body of a successful response, or the service's error message.
async fn checked_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(text);
    }
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
    Err(ApiError::Status { status: status.as_u16(), message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
    let text = checked_body(response).await?;
    if text.trim().is_empty() {
        return Ok(Envelope { data: None });
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

impl TaskApi for HttpApi {
    fn list_tasks(&self) -> ApiFuture<'_, Vec<TaskRecord>> {
        Box::pin(async move {
            self.authorized::<Vec<TaskRecord>>(Method::GET, "task", None).await?.require("task list")
        })
    }

    fn create_task<'a>(&'a self, task: &'a NewTask) -> ApiFuture<'a, TaskRecord> {
        Box::pin(async move {
            let body = serde_json::to_value(task).map_err(|e| ApiError::Decode(e.to_string()))?;
            self.authorized::<TaskRecord>(Method::POST, "task", Some(body))
                .await?
                .require("create task")
        })
    }

    fn move_task<'a>(&'a self, request: &'a RemoteMoveRequest) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let endpoint = format!("task/{}", request.task_id);
            let body = json!({ "status": request.new_status });
            self.authorized::<IgnoredAny>(Method::PUT, &endpoint, Some(body)).await?;
            Ok(())
        })
    }
}

impl AuthApi for HttpApi {
    fn login<'a>(&'a self, email: &'a str, password: &'a str) -> ApiFuture<'a, Session> {
        Box::pin(async move {
            let body = json!({ "email": email, "password": password });
            let envelope = self.unauthenticated::<LoginData>("login", &body).await?;
            self.start_session(envelope.data)
        })
    }

    fn signup<'a>(
        &'a self,
        name: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> ApiFuture<'a, Session> {
        Box::pin(async move {
            let body = json!({ "name": name, "email": email, "password": password });
            let envelope = self.unauthenticated::<LoginData>("signup", &body).await?;
            self.start_session(envelope.data)
        })
    }

    fn refresh<'a>(&'a self, session: &'a Session) -> ApiFuture<'a, TokenPair> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url("token/refresh"))
                .bearer_auth(&session.access_token)
                .json(&json!({ "refreshToken": session.refresh_token }))
                .send()
                .await?;
            let text = checked_body(response).await?;
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
        })
    }
}
