use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tower::ServiceExt;

use super::*;
use crate::config::GateConfig;

fn has_live_session(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .split("; ")
        .any(|c| c == "session_token=good")
}

/// Backend stand-in: `session_token=good` is a live session.
async fn spawn_backend() -> String {
    async fn me(headers: HeaderMap) -> Response {
        if has_live_session(&headers) {
            Json(json!({ "email": "a@b.com", "plan": "pro", "credits": 42 })).into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }

    async fn logout(headers: HeaderMap) -> Response {
        if has_live_session(&headers) {
            (StatusCode::NO_CONTENT, [(header::SET_COOKIE, "session_token=; Max-Age=0; Path=/; HttpOnly")])
                .into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }

    let backend = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });
    format!("http://{addr}")
}

async fn test_router(enforce: bool) -> Router {
    let config = GateConfig {
        enforce,
        api_base_url: spawn_backend().await,
        site_dir: "__no_such_site_dir__".into(),
        ..GateConfig::default()
    };
    app(AppState::new(config, reqwest::Client::new()))
}

async fn get_with(router: Router, uri: &str, cookie: Option<&str>) -> Response {
    send(router, "GET", uri, cookie).await
}

async fn send(router: Router, method: &str, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION].to_str().unwrap().to_owned()
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let response = get_with(test_router(true).await, "/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_redirect_preserves_query() {
    let response = get_with(
        test_router(true).await,
        "/dashboard?upload_id=123&tag=a&tag=b",
        Some("session_token=good"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/app?upload_id=123&tag=a&tag=b");
}

#[tokio::test]
async fn anonymous_dashboard_hits_guard_first() {
    let response = get_with(test_router(true).await, "/dashboard?upload_id=1", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?next=%2Fdashboard");
}

#[tokio::test]
async fn shell_renders_for_live_session() {
    let response = get_with(test_router(true).await, "/app/clips/123", Some("session_token=good")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("logged_in=1")));

    let body = body_text(response).await;
    assert!(body.contains("a@b.com"));
    assert!(body.contains("<a href=\"/app/clips\" class=\"active\">Clips</a>"));
}

#[tokio::test]
async fn shell_evicts_stale_credential_to_login() {
    let response = get_with(test_router(true).await, "/app", Some("session_token=expired; logged_in=1")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("logged_in=;")));
}

#[tokio::test]
async fn shell_is_authoritative_when_guard_is_relaxed() {
    let response = get_with(test_router(false).await, "/app/billing", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn signed_in_visitor_skips_login_page() {
    let response = get_with(test_router(true).await, "/login?next=/app", Some("session_token=good")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/app");
}

#[tokio::test]
async fn public_pages_are_not_redirected() {
    let response = get_with(test_router(true).await, "/pricing", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_redirect_forwards_raw_query() {
    let response = get_with(
        test_router(true).await,
        "/dashboard?ref=/feed&x=%FF&t=a~b&flag",
        Some("session_token=good"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/app?ref=/feed&x=%FF&t=a~b&flag");
}

#[tokio::test]
async fn shell_renders_trailing_slash_root() {
    let response = get_with(test_router(true).await, "/app/", Some("session_token=good")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<a href=\"/app\" class=\"active\">Overview</a>"));
}

#[tokio::test]
async fn dotted_route_under_app_is_still_guarded() {
    let response = get_with(test_router(true).await, "/app/clips/v1.2", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?next=%2Fapp%2Fclips%2Fv1.2");
}

#[tokio::test]
async fn logout_relays_backend_teardown_and_lands_on_login() {
    let response = send(test_router(true).await, "POST", "/logout", Some("session_token=good; logged_in=1")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c == "session_token=; Max-Age=0; Path=/; HttpOnly"), "{cookies:?}");
    assert!(cookies.iter().any(|c| c.starts_with("logged_in=;")), "{cookies:?}");
}

#[tokio::test]
async fn logout_survives_backend_rejection() {
    let response = send(test_router(true).await, "POST", "/logout", Some("session_token=expired")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1, "{cookies:?}");
    assert!(cookies[0].starts_with("logged_in=;"));
}
