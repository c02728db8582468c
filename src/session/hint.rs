//! Advisory `logged_in` cookie.
//!
//! A plain, script-readable flag that lets static pages pick a "Go to app"
//! vs "Sign in" button without a round trip. It proves nothing and the edge
//! guard never reads it.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const HINT_COOKIE_NAME: &str = "logged_in";
pub const HINT_COOKIE_VALUE: &str = "1";

/// Mirrors the backend's session TTL. Not authoritative.
pub const HINT_MAX_AGE: Duration = Duration::days(7);

/// Cookie marking the browser as (probably) signed in.
#[must_use]
pub fn set_hint(secure: bool) -> Cookie<'static> {
    Cookie::build((HINT_COOKIE_NAME, HINT_COOKIE_VALUE))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(HINT_MAX_AGE)
        .build()
}

/// Expired hint cookie.
#[must_use]
pub fn clear_hint(secure: bool) -> Cookie<'static> {
    Cookie::build((HINT_COOKIE_NAME, ""))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
#[path = "hint_test.rs"]
mod tests;
