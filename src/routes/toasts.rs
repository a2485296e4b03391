//! Toast REST routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::{ApiError, api_error, json_rejection_to_error};
use crate::services::toast::{Toast, ToastError, ToastRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedToast {
    pub id: Uuid,
}

/// `GET /api/toasts` — active toasts in display order.
pub async fn list_toasts(State(state): State<AppState>) -> Json<Vec<Toast>> {
    Json(state.toasts.snapshot())
}

/// `POST /api/toasts` — enqueue a toast, returning its id.
pub async fn create_toast(
    State(state): State<AppState>,
    body: Result<Json<ToastRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedToast>), ApiError> {
    let Json(req) = body.map_err(json_rejection_to_error)?;
    match state.toasts.enqueue(req) {
        Ok(id) => Ok((StatusCode::CREATED, Json(CreatedToast { id }))),
        Err(e) => {
            warn!(error = %e, "toast rejected");
            Err(api_error(toast_error_to_status(&e), e.to_string()))
        }
    }
}

/// `DELETE /api/toasts/:id` — dismiss one toast. Unknown ids succeed.
pub async fn dismiss_toast(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    state.toasts.dismiss(id);
    StatusCode::NO_CONTENT
}

/// `DELETE /api/toasts` — dismiss every toast.
pub async fn dismiss_all_toasts(State(state): State<AppState>) -> StatusCode {
    state.toasts.dismiss_all();
    StatusCode::NO_CONTENT
}

pub(crate) fn toast_error_to_status(err: &ToastError) -> StatusCode {
    match err {
        ToastError::EmptyMessage => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
#[path = "toasts_test.rs"]
mod tests;
