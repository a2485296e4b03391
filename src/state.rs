//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once in `main` and injected into Axum handlers via the
//! `State` extractor. It owns the toast manager and the preference store;
//! nothing else in the process holds or mutates either.

use crate::config::Config;
use crate::services::prefs::PrefStore;
use crate::services::toast::{ToastConfig, ToastManager};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; both fields are cheap `Arc`-backed handles.
#[derive(Clone)]
pub struct AppState {
    pub toasts: ToastManager,
    pub prefs: PrefStore,
}

impl AppState {
    #[must_use]
    pub fn new(toasts: ToastManager, prefs: PrefStore) -> Self {
        Self { toasts, prefs }
    }

    /// Build state from runtime configuration, loading preferences from disk.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let toasts = ToastManager::new(ToastConfig { default_duration_ms: config.toast_default_duration_ms });
        Self::new(toasts, PrefStore::open(&config.prefs_path))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
