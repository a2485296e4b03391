//! Toast service — ordered notification set with timed auto-dismissal.
//!
//! DESIGN
//! ======
//! `ToastManager` is a cheap-to-clone handle over one shared `Inner`. The
//! active list lives in a `Vec` (insertion order = display order) guarded by
//! a `std::sync::Mutex`. Each toast with a non-zero duration gets a one-shot
//! Tokio task; its `AbortHandle` is stored beside the toast id so a manual
//! dismiss cancels it deterministically.
//!
//! Every mutation publishes the new list through a `watch` channel while the
//! lock is still held, so subscribers see changes in mutation order.
//!
//! LIFECYCLE
//! =========
//! `Active -> Dismissed` (terminal). Triggers: `dismiss`, `dismiss_all`, or
//! timer expiry. Toasts are never mutated after creation, only removed.
//! Timer tasks hold a `Weak<Inner>`; once the last manager handle drops they
//! find nothing to upgrade and exit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_DURATION_MS: u64 = 3000;

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToastError {
    #[error("toast message must not be empty")]
    EmptyMessage,
}

// =============================================================================
// TOAST
// =============================================================================

/// Semantic category controlling a toast's visual treatment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Variant {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// An active notification. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    pub variant: Variant,
    /// Auto-dismiss delay. `0` means the toast stays until dismissed.
    pub duration_ms: u64,
}

/// Enqueue request. Unset fields fall back to the manager's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToastRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub variant: Option<Variant>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl ToastRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

// =============================================================================
// MANAGER
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ToastConfig {
    /// Applied when a request leaves `duration_ms` unset.
    pub default_duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { default_duration_ms: DEFAULT_DURATION_MS }
    }
}

/// Owner of the active toast set. Clone to share; all clones see one set.
///
/// `enqueue` spawns expiry timers, so it must be called from within a Tokio
/// runtime.
#[derive(Clone)]
pub struct ToastManager {
    inner: Arc<Inner>,
}

struct Inner {
    config: ToastConfig,
    set: Mutex<ToastSet>,
    tx: watch::Sender<Vec<Toast>>,
}

#[derive(Default)]
struct ToastSet {
    active: Vec<Toast>,
    /// Pending expiry tasks keyed by toast id.
    timers: HashMap<Uuid, AbortHandle>,
}

impl ToastManager {
    #[must_use]
    pub fn new(config: ToastConfig) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { inner: Arc::new(Inner { config, set: Mutex::new(ToastSet::default()), tx }) }
    }

    #[cfg(test)]
    pub(crate) fn config(&self) -> ToastConfig {
        self.inner.config
    }

    /// Append a toast and schedule its expiry. Returns the new id without
    /// waiting on anything.
    ///
    /// # Errors
    ///
    /// Returns `ToastError::EmptyMessage` if the message is empty or only
    /// whitespace. The active set is left untouched.
    pub fn enqueue(&self, request: ToastRequest) -> Result<Uuid, ToastError> {
        if request.message.trim().is_empty() {
            return Err(ToastError::EmptyMessage);
        }

        let toast = Toast {
            id: Uuid::new_v4(),
            title: request.title,
            message: request.message,
            variant: request.variant.unwrap_or_default(),
            duration_ms: request
                .duration_ms
                .unwrap_or(self.inner.config.default_duration_ms),
        };
        let id = toast.id;
        let duration_ms = toast.duration_ms;
        let variant = toast.variant;

        let mut set = self.inner.lock();
        set.active.push(toast);
        if duration_ms > 0 {
            let handle = spawn_expiry(Arc::downgrade(&self.inner), id, Duration::from_millis(duration_ms));
            set.timers.insert(id, handle);
        }
        self.inner.publish(&set);
        drop(set);

        debug!(%id, variant = variant.as_str(), duration_ms, "toast enqueued");
        Ok(id)
    }

    /// Remove a toast and cancel its pending expiry. Unknown ids are ignored.
    pub fn dismiss(&self, id: Uuid) {
        let mut set = self.inner.lock();
        if let Some(timer) = set.timers.remove(&id) {
            timer.abort();
        }
        if self.inner.remove_locked(&mut set, id) {
            debug!(%id, "toast dismissed");
        }
    }

    /// Remove every toast and cancel every pending expiry.
    pub fn dismiss_all(&self) {
        let mut set = self.inner.lock();
        for (_, timer) in set.timers.drain() {
            timer.abort();
        }
        if set.active.is_empty() {
            return;
        }
        let count = set.active.len();
        set.active.clear();
        self.inner.publish(&set);
        debug!(count, "all toasts dismissed");
    }

    /// Current active toasts in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.inner.lock().active.clone()
    }

    /// Observe the active list. The receiver starts at the current list and
    /// is updated after every enqueue, dismissal or expiry.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.tx.subscribe()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().active.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn pending_timers(&self) -> usize {
        self.inner.lock().timers.len()
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, ToastSet> {
        self.set
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn publish(&self, set: &ToastSet) {
        self.tx.send_replace(set.active.clone());
    }

    /// Remove `id` from the active list and publish. Returns whether it was present.
    fn remove_locked(&self, set: &mut ToastSet, id: Uuid) -> bool {
        let Some(pos) = set.active.iter().position(|t| t.id == id) else {
            return false;
        };
        set.active.remove(pos);
        self.publish(set);
        true
    }

    /// Timer path: the task is finishing on its own, so its handle is dropped
    /// rather than aborted.
    fn expire(&self, id: Uuid) {
        let mut set = self.lock();
        set.timers.remove(&id);
        if self.remove_locked(&mut set, id) {
            debug!(%id, "toast expired");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let set = self
            .set
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for (_, timer) in set.timers.drain() {
            timer.abort();
        }
    }
}

fn spawn_expiry(inner: Weak<Inner>, id: Uuid, after: Duration) -> AbortHandle {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        // EDGE: manager dropped while the timer was pending.
        if let Some(inner) = inner.upgrade() {
            inner.expire(id);
        }
    })
    .abort_handle()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "toast_test.rs"]
mod tests;
