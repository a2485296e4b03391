use super::*;
use crate::services::theme::{self, Theme};
use crate::state::test_helpers;
use axum::body::Body;
use axum::http::{Method, Request, header};
use tower::ServiceExt;

/// Send one request through the full router and return status + JSON body.
async fn send(state: AppState, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

// =============================================================================
// /api/prefs/theme
// =============================================================================

#[tokio::test]
async fn put_unknown_theme_is_bad_request_with_error_body() {
    let state = test_helpers::test_app_state();

    let (status, body) = send(state.clone(), Method::PUT, "/api/prefs/theme", r#"{"theme":"sepia"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("sepia")));
    assert_eq!(theme::load_theme(&state.prefs), Theme::System);
}

#[tokio::test]
async fn put_theme_accepts_any_case() {
    let state = test_helpers::test_app_state();

    let (status, body) = send(
        state.clone(),
        Method::PUT,
        "/api/prefs/theme?prefers_dark=false",
        r#"{"theme":"Dark"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "theme": "dark", "resolved": "dark" }));
    assert_eq!(theme::load_theme(&state.prefs), Theme::Dark);
}

#[tokio::test]
async fn put_theme_malformed_json_is_bad_request() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(state, Method::PUT, "/api/prefs/theme", "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_theme_resets_to_system() {
    let state = test_helpers::test_app_state();
    theme::save_theme(&state.prefs, Theme::Light).unwrap();

    let (status, body) = send(state.clone(), Method::DELETE, "/api/prefs/theme?prefers_dark=true", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "theme": "system", "resolved": "dark" }));
    assert_eq!(theme::load_theme(&state.prefs), Theme::System);
}

// =============================================================================
// /api/toasts
// =============================================================================

#[tokio::test]
async fn post_toast_without_message_is_bad_request_with_error_body() {
    let state = test_helpers::test_app_state();

    let (status, body) = send(state.clone(), Method::POST, "/api/toasts", r#"{"variant":"info"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("message")));
    assert!(state.toasts.is_empty());
}

#[tokio::test]
async fn post_toast_empty_message_is_bad_request() {
    let state = test_helpers::test_app_state();

    let (status, body) = send(state.clone(), Method::POST, "/api/toasts", r#"{"message":""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "toast message must not be empty");
    assert!(state.toasts.is_empty());
}

#[tokio::test]
async fn post_toast_then_list() {
    let state = test_helpers::test_app_state();

    let (status, created) = send(
        state.clone(),
        Method::POST,
        "/api/toasts",
        r#"{"message":"Saved","variant":"success","duration_ms":0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = send(state, Method::GET, "/api/toasts", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], created["id"]);
    assert_eq!(list[0]["message"], "Saved");
    assert_eq!(list[0]["variant"], "success");
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, _) = send(test_helpers::test_app_state(), Method::GET, "/healthz", "").await;
    assert_eq!(status, StatusCode::OK);
}
