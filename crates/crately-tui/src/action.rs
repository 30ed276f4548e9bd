//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use crately_core::{ConnectionState, Item, ItemWriteRequest};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Delete awaiting a y/n answer in the confirm popup.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub id: i64,
    pub name: String,
}

impl fmt::Display for PendingDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Delete {}? This cannot be undone.", self.name)
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data events (from the crately-core data bridge) ────────────
    ItemsUpdated(Arc<Vec<Arc<Item>>>),
    ConnectionChanged(ConnectionState),

    // ── Mutations ──────────────────────────────────────────────────
    CreateItem(ItemWriteRequest),
    UpdateItem { id: i64, update: ItemWriteRequest },
    RequestDelete(PendingDelete),
    ConfirmYes,
    ConfirmNo,
    /// An in-flight create or update finished on the service side;
    /// the form may now clear and close.
    FormSaved,
    Refresh,

    // ── Overlays ───────────────────────────────────────────────────
    ToggleHelp,
    Notify(Notification),
    DismissNotification,
}
