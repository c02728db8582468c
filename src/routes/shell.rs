//! Server-rendered dashboard shell.
//!
//! Each request mounts a [`ShellSession`] against the backend with the
//! visitor's own cookies, waits for it to settle, and renders either the
//! shell or the login redirect the session asked for. There is no document
//! on the server, so the scroll lock is inert.
//!
//! Logout goes through this server too: the browser only ever talks to the
//! page origin, and the backend's cookie teardown is relayed back to it.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Uri, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::session::menu::{ScrollLock, ScrollStyle};
use crate::paths::LOGIN_PATH;
use crate::session::{IdentitySnapshot, Navigator, SessionState, ShellEnv, ShellSession, hint, nav};
use crate::state::AppState;

/// Captures the shell's navigation so it can become an HTTP redirect.
#[derive(Default)]
struct PendingRedirect {
    target: Mutex<Option<String>>,
}

impl PendingRedirect {
    fn take(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
    }
}

impl Navigator for PendingRedirect {
    fn replace(&self, path: &str) {
        *self.target.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(path.to_owned());
    }

    // A redirect is already a full reload.
    fn refresh(&self) {}
}

struct NoDocument;

impl ScrollLock for NoDocument {
    fn read(&self) -> ScrollStyle {
        ScrollStyle::default()
    }

    fn write(&self, _style: ScrollStyle) {}
}

/// `GET /app`, `GET /app/` and `GET /app/{*rest}` — bootstrap the session, then render.
pub async fn shell(State(state): State<AppState>, jar: CookieJar, headers: HeaderMap, uri: Uri) -> Response {
    let redirect = Arc::new(PendingRedirect::default());
    let env = ShellEnv {
        api: Arc::new(state.auth_api.with_cookie(headers.get(header::COOKIE).cloned())),
        navigator: redirect.clone(),
        scroll: Arc::new(NoDocument),
        login_path: LOGIN_PATH.to_owned(),
    };

    let session = ShellSession::mount(env, uri.path());
    let settled = session.settled().await;
    let secure = state.config.cookie_secure;

    match settled {
        SessionState::Authenticated(identity) => {
            let page = render_shell(&identity, session.active_tab());
            (jar.add(hint::set_hint(secure)), Html(page)).into_response()
        }
        SessionState::Loading | SessionState::Unauthenticated => {
            let target = redirect.take().unwrap_or_else(|| LOGIN_PATH.to_owned());
            (jar.add(hint::clear_hint(secure)), Redirect::temporary(&target)).into_response()
        }
    }
}

/// `POST /logout` — end the backend session with the visitor's cookies,
/// relay the backend's `Set-Cookie` teardown, drop the hint and send the
/// browser to login. Backend failures still sign the visitor out locally.
pub async fn logout(State(state): State<AppState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let api = state.auth_api.with_cookie(headers.get(header::COOKIE).cloned());
    let teardown = match api.sign_out().await {
        Ok(cookies) => cookies,
        Err(e) => {
            tracing::debug!(error = %e, "backend logout failed; clearing local session anyway");
            Vec::new()
        }
    };

    let jar = jar.add(hint::clear_hint(state.config.cookie_secure));
    let mut response = (jar, Redirect::to(LOGIN_PATH)).into_response();
    for cookie in teardown {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }
    response
}

/// Minimal dashboard frame: section nav plus the identity summary.
#[must_use]
pub fn render_shell(identity: &IdentitySnapshot, active_tab: Option<&str>) -> String {
    let mut links = String::new();
    for section in nav::SECTIONS {
        let class = if active_tab == Some(section.key) { " class=\"active\"" } else { "" };
        links.push_str(&format!("<a href=\"{}\"{class}>{}</a>", section.href(), section.label));
    }

    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>Clipforge</title></head><body>",
            "<nav>{links}</nav>",
            "<section id=\"account\">",
            "<span class=\"email\">{email}</span>",
            "<span class=\"plan\">{plan}</span>",
            "<span class=\"credits\">{credits} credits</span>",
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Log out</button></form>",
            "</section><main id=\"content\"></main></body></html>"
        ),
        links = links,
        email = html_escape::encode_text(&identity.email),
        plan = html_escape::encode_text(&identity.plan),
        credits = identity.credits,
    )
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
