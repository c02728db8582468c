//! Request path classification.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by the edge guard and the dashboard shell. Matching is segment
//! aware: a prefix matches itself and anything below it (`/app`, `/app/`,
//! `/app/clips`) but never a sibling that merely shares characters
//! (`/apples`).

/// Authenticated root. Signed-in visitors on an auth page land here.
pub const APP_PATH: &str = "/app";

/// Login page. Anonymous visitors on a protected path land here with `next`.
pub const LOGIN_PATH: &str = "/login";

/// Route prefixes that require a session credential.
pub const PROTECTED_PREFIXES: &[&str] = &[APP_PATH, "/dashboard", "/upload", "/clips", "/billing", "/settings"];

/// Entry points that establish a new session.
pub const AUTH_PAGE_PREFIXES: &[&str] = &[LOGIN_PATH, "/register"];

/// Framework asset and static-file roots that the guard never inspects.
pub const BYPASS_PREFIXES: &[&str] = &["/_next", "/pkg", "/assets", "/static"];

/// Well-known files served at the site root.
pub const BYPASS_FILES: &[&str] = &["/favicon.ico", "/robots.txt", "/sitemap.xml"];

/// Backend proxy root. Requests here carry their own auth.
pub const API_PROXY_PREFIX: &str = "/api";

/// Extensions served as static files. Dotted route segments with any other
/// suffix (`/app/clips/v1.2`) are pages and stay guarded.
pub const STATIC_EXTENSIONS: &[&str] = &[
    "avif", "css", "gif", "ico", "jpeg", "jpg", "js", "json", "map", "mjs", "mp4", "otf", "pdf", "png", "svg",
    "ttf", "txt", "wasm", "webm", "webmanifest", "webp", "woff", "woff2", "xml",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Protected,
    AuthPage,
    Public,
}

/// True when `path` is `prefix` itself or lives below it.
#[must_use]
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Classify a request path. Query strings must already be stripped.
#[must_use]
pub fn classify(path: &str) -> PathClass {
    if PROTECTED_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Protected
    } else if AUTH_PAGE_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::AuthPage
    } else {
        PathClass::Public
    }
}

/// Paths the guard passes through untouched: framework assets, well-known
/// files, files with a known static extension, and the API proxy.
#[must_use]
pub fn is_bypassed(path: &str) -> bool {
    if BYPASS_FILES.contains(&path) {
        return true;
    }
    if matches_prefix(path, API_PROXY_PREFIX) || BYPASS_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        return true;
    }
    has_static_extension(path)
}

fn has_static_extension(path: &str) -> bool {
    let last = path.rsplit('/').next().unwrap_or_default();
    match last.rsplit_once('.') {
        // A leading dot is a hidden name, not an extension.
        Some((stem, ext)) if !stem.is_empty() => {
            STATIC_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext))
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;
