//! Page-server configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Guard enforcement is an explicit switch (`AUTH_GATE_ENFORCE`) rather than
//! a runtime-mode guess. It defaults to on; development topologies where the
//! credential cookie lives on the API origin must turn it off deliberately.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_COOKIE: &str = "session_token";
pub const DEFAULT_SITE_DIR: &str = "site";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} is not a port number")]
    InvalidPort { key: &'static str, value: String },
    #[error("invalid {key}: {value:?} is not a boolean (expected 1/0, true/false, yes/no, on/off)")]
    InvalidBool { key: &'static str, value: String },
    #[error("invalid {key}: must not be empty")]
    Empty { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    pub port: u16,
    /// Whether the edge guard redirects at all. Only valid when the page
    /// server can see the credential cookie (shared parent domain).
    pub enforce: bool,
    pub api_base_url: String,
    pub session_cookie: String,
    pub site_dir: PathBuf,
    pub cookie_secure: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            enforce: true,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_owned(),
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            cookie_secure: false,
        }
    }
}

impl GateConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `AUTH_GATE_ENFORCE`: default `true`
    /// - `API_BASE_URL`: default `http://localhost:8000`
    /// - `SESSION_COOKIE`: default `session_token`
    /// - `SITE_DIR`: default `site`
    /// - `COOKIE_SECURE`: default `false`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set but malformed.
    ///
    /// The login and app routes are fixed (`paths::LOGIN_PATH`,
    /// `paths::APP_PATH`) because path classification is built on them.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. `from_env` delegates here so
    /// tests can feed a map instead of mutating process env.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a value is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { key: "PORT", value: raw })?,
            None => defaults.port,
        };

        let enforce = parse_bool_var("AUTH_GATE_ENFORCE", lookup("AUTH_GATE_ENFORCE"))?.unwrap_or(defaults.enforce);
        let cookie_secure = parse_bool_var("COOKIE_SECURE", lookup("COOKIE_SECURE"))?.unwrap_or(defaults.cookie_secure);

        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim()
            .trim_end_matches('/')
            .to_owned();
        if api_base_url.is_empty() {
            return Err(ConfigError::Empty { key: "API_BASE_URL" });
        }

        let session_cookie = lookup("SESSION_COOKIE")
            .map(|raw| raw.trim().to_owned())
            .unwrap_or(defaults.session_cookie);
        if session_cookie.is_empty() {
            return Err(ConfigError::Empty { key: "SESSION_COOKIE" });
        }

        let site_dir = lookup("SITE_DIR").map_or(defaults.site_dir, PathBuf::from);

        Ok(Self { port, enforce, api_base_url, session_cookie, site_dir, cookie_secure })
    }
}

/// Parse the usual truthy/falsy spellings. `None` when the value is unset.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_bool_var(key: &'static str, raw: Option<String>) -> Result<Option<bool>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_bool(&value)
            .map(Some)
            .ok_or(ConfigError::InvalidBool { key, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
