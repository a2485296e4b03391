//! Domain services used by HTTP and websocket routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own state and business rules so route handlers stay
//! focused on protocol translation. None of them depend on Axum.

pub mod prefs;
pub mod theme;
pub mod toast;
