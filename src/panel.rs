//! Notification Panel - view model over the store
//!
//! Owns the `NotificationStore` for the session and exposes the projections
//! the panel surface renders. Drawing itself is left to the caller.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::notification::{
    format_timestamp, Locale, Notification, NotificationKind, NotificationStore, Priority,
};

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelEntry {
    pub id: String,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub accent: &'static str,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub time_label: String,
    pub read: bool,
    pub score_badge: Option<String>,
}

impl PanelEntry {
    fn project(record: &Notification, now: DateTime<Utc>, locale: Locale) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.kind,
            icon: record.kind.icon(),
            accent: record.priority.accent(),
            priority: record.priority,
            title: record.title.clone(),
            message: record.message.clone(),
            time_label: format_timestamp(now, record.created_at).label(locale),
            read: record.read,
            score_badge: record.score_badge(),
        }
    }
}

type CloseHook = Box<dyn FnMut() + Send>;

pub struct NotificationPanel {
    store: NotificationStore,
    open: bool,
    on_close: Option<CloseHook>,
}

impl NotificationPanel {
    /// Closed panel over `store`
    pub fn new(store: NotificationStore) -> Self {
        Self {
            store,
            open: false,
            on_close: None,
        }
    }

    /// Callback run every time the panel closes
    pub fn with_on_close(mut self, on_close: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    pub fn records(&self) -> Arc<[Notification]> {
        self.store.records()
    }

    pub fn unread_count(&self) -> usize {
        self.store.unread_count()
    }

    /// Unread badge, hidden at zero
    pub fn badge(&self) -> Option<usize> {
        match self.unread_count() {
            0 => None,
            n => Some(n),
        }
    }

    /// "Mark all" is offered only while something is unread
    pub fn show_mark_all(&self) -> bool {
        self.unread_count() > 0
    }

    // ═══════════════════════════════════════════════════════════════
    // User interactions
    // ═══════════════════════════════════════════════════════════════

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.store.mark_read(id)
    }

    pub fn mark_all_read(&mut self) -> usize {
        self.store.mark_all_read()
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    /// Rows to render, `None` while the panel is closed
    pub fn entries(&self, now: DateTime<Utc>, locale: Locale) -> Option<Vec<PanelEntry>> {
        if !self.open {
            return None;
        }
        Some(
            self.store
                .iter()
                .map(|record| PanelEntry::project(record, now, locale))
                .collect(),
        )
    }
}

impl std::fmt::Debug for NotificationPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPanel")
            .field("open", &self.open)
            .field("records", &self.store.len())
            .field("unread", &self.unread_count())
            .finish()
    }
}
