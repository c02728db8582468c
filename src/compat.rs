//! Legacy route compatibility.
//!
//! The dashboard moved from `/dashboard` to the authenticated root. Old
//! links (upload notifications in particular) carry query parameters that
//! must arrive at the new location intact, repeated keys included. The raw
//! query is forwarded byte for byte; decoding it would rewrite encodings the
//! link author chose.

use axum::extract::RawQuery;
use axum::response::Redirect;

use crate::paths::APP_PATH;

/// Build the new location for a legacy dashboard request.
#[must_use]
pub fn dashboard_redirect_target(raw_query: Option<&str>) -> String {
    match raw_query {
        Some(query) if !query.is_empty() => format!("{APP_PATH}?{query}"),
        _ => APP_PATH.to_owned(),
    }
}

/// `GET /dashboard` — redirect to the app root, query preserved.
pub async fn redirect_dashboard(RawQuery(query): RawQuery) -> Redirect {
    Redirect::temporary(&dashboard_redirect_target(query.as_deref()))
}

#[cfg(test)]
#[path = "compat_test.rs"]
mod tests;
