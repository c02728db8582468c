//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! is immutable after startup: config, the guard built from it, and the
//! backend client the dashboard shell clones per request.

use std::sync::Arc;

use crate::config::GateConfig;
use crate::guard::AccessGuard;
use crate::session::HttpAuthApi;

/// Clone is required by Axum; all inner fields are Arc-wrapped or cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GateConfig>,
    pub guard: AccessGuard,
    pub auth_api: HttpAuthApi,
}

impl AppState {
    #[must_use]
    pub fn new(config: GateConfig, http: reqwest::Client) -> Self {
        let guard = AccessGuard::from_config(&config);
        let auth_api = HttpAuthApi::new(http, &config.api_base_url);
        Self { config: Arc::new(config), guard, auth_api }
    }
}
