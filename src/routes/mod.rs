//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST endpoints for toasts and preferences plus the
//! websocket viewport feed under a single Axum router. Handlers translate
//! HTTP to service calls; they hold no state of their own.

pub mod prefs;
pub mod toasts;
pub mod ws;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/toasts",
            get(toasts::list_toasts)
                .post(toasts::create_toast)
                .delete(toasts::dismiss_all_toasts),
        )
        .route("/api/toasts/ws", get(ws::handle_ws))
        .route("/api/toasts/{id}", axum::routing::delete(toasts::dismiss_toast))
        .route(
            "/api/prefs/theme",
            get(prefs::get_theme)
                .put(prefs::put_theme)
                .delete(prefs::reset_theme),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Error body shared by every input-validation failure: `{"error": "..."}`.
pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Map Axum's JSON body rejections (bad syntax, wrong shape, missing content
/// type) to a 400 with the shared error body.
pub(crate) fn json_rejection_to_error(rejection: JsonRejection) -> ApiError {
    tracing::warn!(error = %rejection.body_text(), "request body rejected");
    api_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
