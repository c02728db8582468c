//! Backend authentication API client.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode (transport, non-2xx, undecodable body) surfaces as an
//! [`AuthApiError`]. The shell treats them all the same way: not signed in.
//! The variants exist for logs, never for visitors.

use axum::http::{HeaderValue, header};
use serde::{Deserialize, Serialize};

/// Who the backend says the current session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    pub email: String,
    pub plan: String,
    pub credits: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthApiError {
    /// No response arrived.
    #[error("auth request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("auth response error: status {status}")]
    Status { status: u16 },

    /// The identity body could not be parsed.
    #[error("auth response parse failed: {0}")]
    Decode(String),
}

/// Backend session endpoints consumed by the dashboard shell.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthApiError`] when the session is missing or invalid,
    /// or the backend is unreachable.
    async fn me(&self) -> Result<IdentitySnapshot, AuthApiError>;

    /// `POST /auth/logout`. Callers ignore the outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthApiError`] on transport failure or non-2xx status.
    async fn logout(&self) -> Result<(), AuthApiError>;
}

/// `reqwest`-backed [`AuthApi`].
///
/// Authentication rides on cookies only: the visitor's `Cookie` header is
/// forwarded as-is and no `Authorization` header is ever set.
#[derive(Clone)]
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
    cookie: Option<HeaderValue>,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url, cookie: None }
    }

    /// Clone of this client that forwards `cookie` on every call.
    #[must_use]
    pub fn with_cookie(&self, cookie: Option<HeaderValue>) -> Self {
        Self { http: self.http.clone(), base_url: self.base_url.clone(), cookie }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/logout`, returning the backend's `Set-Cookie` headers so
    /// the page server can hand the credential teardown to the browser.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthApiError`] on transport failure or non-2xx status.
    pub async fn sign_out(&self) -> Result<Vec<HeaderValue>, AuthApiError> {
        let resp = self
            .request(reqwest::Method::POST, "/auth/logout")
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AuthApiError::Status { status: status.as_u16() });
        }
        Ok(resp.headers().get_all(header::SET_COOKIE).iter().cloned().collect())
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie.clone()),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn me(&self) -> Result<IdentitySnapshot, AuthApiError> {
        let resp = self
            .request(reqwest::Method::GET, "/auth/me")
            .send()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AuthApiError::Status { status: status.as_u16() });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| AuthApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| AuthApiError::Decode(e.to_string()))
    }

    async fn logout(&self) -> Result<(), AuthApiError> {
        self.sign_out().await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
