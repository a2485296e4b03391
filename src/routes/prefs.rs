//! Preference routes — theme get/set/reset.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ApiError, json_rejection_to_error};
use crate::services::theme::{self, ResolvedTheme, THEME_KEY, Theme};
use crate::state::AppState;

/// Client color-scheme signal, forwarded as a query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct ThemeQuery {
    #[serde(default)]
    pub prefers_dark: bool,
}

#[derive(Debug, Deserialize)]
pub struct ThemeUpdate {
    pub theme: Theme,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub resolved: ResolvedTheme,
}

impl ThemeResponse {
    fn new(theme: Theme, prefers_dark: bool) -> Self {
        Self { theme, resolved: theme.resolve(prefers_dark) }
    }
}

/// `GET /api/prefs/theme` — stored theme and its resolution.
pub async fn get_theme(State(state): State<AppState>, Query(q): Query<ThemeQuery>) -> Json<ThemeResponse> {
    Json(ThemeResponse::new(theme::load_theme(&state.prefs), q.prefers_dark))
}

/// `PUT /api/prefs/theme` — store a theme. Unknown names are a 400. A failed
/// disk write is logged; the in-memory value still applies for this process.
pub async fn put_theme(
    State(state): State<AppState>,
    Query(q): Query<ThemeQuery>,
    body: Result<Json<ThemeUpdate>, JsonRejection>,
) -> Result<Json<ThemeResponse>, ApiError> {
    let Json(update) = body.map_err(json_rejection_to_error)?;
    if let Err(e) = theme::save_theme(&state.prefs, update.theme) {
        warn!(error = %e, theme = %update.theme, "theme not persisted");
    }
    Ok(Json(ThemeResponse::new(update.theme, q.prefers_dark)))
}

/// `DELETE /api/prefs/theme` — forget the stored theme (back to `system`).
pub async fn reset_theme(State(state): State<AppState>, Query(q): Query<ThemeQuery>) -> Json<ThemeResponse> {
    if let Err(e) = state.prefs.remove(THEME_KEY) {
        warn!(error = %e, "theme reset not persisted");
    }
    Json(ThemeResponse::new(Theme::default(), q.prefers_dark))
}

#[cfg(test)]
#[path = "prefs_test.rs"]
mod tests;
