//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request passes the edge guard first, including the static
//! marketing pages served by the fallback. Behind it sit the legacy
//! dashboard redirect, the server-rendered shell under `/app`, the logout
//! relay, and a health check. The backend API lives on its own origin and
//! is never routed here.

pub mod shell;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::compat;
use crate::guard::guard_middleware;
use crate::state::AppState;

/// Full page-server router.
pub fn app(state: AppState) -> Router {
    let site = ServeDir::new(&state.config.site_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/dashboard", get(compat::redirect_dashboard))
        .route("/app", get(shell::shell))
        .route("/app/", get(shell::shell))
        .route("/app/{*rest}", get(shell::shell))
        .route("/logout", post(shell::logout))
        .route("/healthz", get(healthz))
        .fallback_service(site)
        .layer(from_fn_with_state(state.guard.clone(), guard_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
