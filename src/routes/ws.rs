//! WebSocket handler — toast viewport feed.
//!
//! DESIGN
//! ======
//! Each connection subscribes to the toast manager's `watch` channel and
//! enters a `select!` loop:
//! - Manager publishes a new active list → push a `toasts` snapshot
//! - Client sends a command → dismiss one or all toasts
//!
//! Snapshots coalesce: a slow client skips intermediate lists and always
//! receives the latest one.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → subscribe → send the current list
//! 2. Manager changes → send the new list
//! 3. Client `dismiss` / `dismiss_all` → manager mutation → step 2
//! 4. Close or send failure → drop subscription

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::toast::Toast;
use crate::state::AppState;

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ServerMessage<'a> {
    Toasts { toasts: &'a [Toast] },
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ClientMessage {
    Dismiss { id: Uuid },
    DismissAll,
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    let mut toasts_rx = state.toasts.subscribe();

    let initial = toasts_rx.borrow_and_update().clone();
    if send_snapshot(&mut socket, &initial).await.is_err() {
        return;
    }

    info!(%client_id, "ws: viewport connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                match msg {
                    Message::Text(text) => apply_client_message(&state, client_id, text.as_str()),
                    Message::Close(_) => break,
                    Message::Binary(bytes) => {
                        debug!(%client_id, len = bytes.len(), "ws: ignoring binary client message");
                    }
                    Message::Ping(_) | Message::Pong(_) => {}
                }
            }
            changed = toasts_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = toasts_rx.borrow_and_update().clone();
                if send_snapshot(&mut socket, &snapshot).await.is_err() {
                    break;
                }
            }
        }
    }

    info!(%client_id, "ws: viewport disconnected");
}

fn apply_client_message(state: &AppState, client_id: Uuid, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Dismiss { id }) => {
            debug!(%client_id, %id, "ws: dismiss requested");
            state.toasts.dismiss(id);
        }
        Ok(ClientMessage::DismissAll) => {
            debug!(%client_id, "ws: dismiss_all requested");
            state.toasts.dismiss_all();
        }
        Err(e) => {
            warn!(%client_id, error = %e, "ws: ignoring malformed client message");
        }
    }
}

async fn send_snapshot(socket: &mut WebSocket, toasts: &[Toast]) -> Result<(), ()> {
    let text = match serde_json::to_string(&ServerMessage::Toasts { toasts }) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "ws: snapshot encode failed");
            return Err(());
        }
    };
    socket.send(Message::Text(text.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
