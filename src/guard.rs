//! Edge access guard.
//!
//! ARCHITECTURE
//! ============
//! Runs in front of every route as axum middleware. It is the coarse gate:
//! it only tests whether the credential cookie is present and non-empty,
//! never what it contains. The dashboard shell's identity fetch is the
//! authoritative check.
//!
//! OPERATIONAL INVARIANT
//! =====================
//! Enforcement is only meaningful when this server and the backend share a
//! cookie-visible domain. With the credential scoped to another origin every
//! protected request would look anonymous, so such deployments run with
//! `enforce = false` and the guard allows everything.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::config::GateConfig;
use crate::paths::{self, PathClass};

/// Query parameter carrying the post-login return path.
pub const NEXT_PARAM: &str = "next";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Anonymous visitor on a protected path. Carries the full login URL.
    RedirectToLogin(String),
    /// Signed-in visitor on a login/registration page.
    RedirectToApp(String),
}

#[derive(Debug, Clone)]
pub struct AccessGuard {
    enforce: bool,
    session_cookie: String,
}

impl AccessGuard {
    #[must_use]
    pub fn new(enforce: bool, session_cookie: impl Into<String>) -> Self {
        Self { enforce, session_cookie: session_cookie.into() }
    }

    #[must_use]
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.enforce, &config.session_cookie)
    }

    #[must_use]
    pub fn enforcing(&self) -> bool {
        self.enforce
    }

    #[must_use]
    pub fn session_cookie(&self) -> &str {
        &self.session_cookie
    }

    /// Decide what to do with a request for `path`.
    ///
    /// `has_credential` must come from cookie presence alone.
    #[must_use]
    pub fn decide(&self, path: &str, has_credential: bool) -> Decision {
        if paths::is_bypassed(path) || !self.enforce {
            return Decision::Allow;
        }

        match (paths::classify(path), has_credential) {
            (PathClass::AuthPage, true) => Decision::RedirectToApp(paths::APP_PATH.to_owned()),
            (PathClass::Protected, false) => Decision::RedirectToLogin(login_url(paths::LOGIN_PATH, path)),
            _ => Decision::Allow,
        }
    }

    /// True when the jar holds a non-empty credential cookie. The advisory
    /// `logged_in` hint is deliberately not consulted.
    #[must_use]
    pub fn has_credential(&self, jar: &CookieJar) -> bool {
        jar.get(&self.session_cookie)
            .is_some_and(|cookie| !cookie.value().is_empty())
    }
}

/// Build the login redirect: `template` plus `next=<path>`.
/// Existing template parameters survive; a stale `next` is replaced so the
/// result carries exactly one.
#[must_use]
pub fn login_url(template: &str, return_path: &str) -> String {
    let (base, query) = template.split_once('?').unwrap_or((template, ""));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key != NEXT_PARAM {
            serializer.append_pair(&key, &value);
        }
    }
    serializer.append_pair(NEXT_PARAM, return_path);

    format!("{base}?{}", serializer.finish())
}

/// Axum middleware applying [`AccessGuard::decide`] to every request.
pub async fn guard_middleware(State(guard): State<AccessGuard>, jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    match guard.decide(&path, guard.has_credential(&jar)) {
        Decision::Allow => next.run(request).await,
        Decision::RedirectToLogin(target) => {
            tracing::debug!(%path, %target, "guard: anonymous request to protected path");
            Redirect::temporary(&target).into_response()
        }
        Decision::RedirectToApp(target) => {
            tracing::debug!(%path, %target, "guard: signed-in request to auth page");
            Redirect::temporary(&target).into_response()
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
