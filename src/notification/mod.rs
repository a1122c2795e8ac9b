//! Notification Module - persistent inbox records (v0.1)
//!
//! Key types:
//! - `Notification`: value object with read/priority state
//! - `NotificationKind`: 6 kinds of inbox records
//! - `Priority`: styling class (low/medium/high), never drives behavior
//! - `NotificationStore`: ordered, copy-on-write collection
//! - `RelativeTime`: "5h ago" style timestamp labels

mod seed;
mod store;
mod timestamp;

pub use seed::{load_seed, sample_notifications};
pub use store::NotificationStore;
pub use timestamp::{format_timestamp, Locale, RelativeTime};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of inbox record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PoliticianUpdate,
    ScoreChange,
    NewAction,
    WeeklyReport,
    System,
    Achievement,
}

impl NotificationKind {
    /// Icon name shown next to the record
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::PoliticianUpdate => "users",
            NotificationKind::ScoreChange => "trending-up",
            NotificationKind::NewAction => "calendar",
            NotificationKind::WeeklyReport => "info",
            NotificationKind::Achievement => "star",
            NotificationKind::System => "bell",
        }
    }
}

/// Presentation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Accent color name used by the panel
    pub fn accent(&self) -> &'static str {
        match self {
            Priority::High => "red",
            Priority::Medium => "yellow",
            Priority::Low => "blue",
        }
    }
}

/// A persistent inbox record
///
/// `id`, `created_at` and `priority` are fixed at creation. `read` only
/// moves from `false` to `true`, and only through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub politician_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_change: Option<i32>,
}

impl Notification {
    /// Create an unread notification with a fresh UUID id
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            message: message.into(),
            created_at,
            read: false,
            priority,
            politician_name: None,
            action_type: None,
            score_change: None,
        }
    }

    /// Override the generated id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Seed the record as already read
    pub fn already_read(mut self) -> Self {
        self.read = true;
        self
    }

    pub fn with_politician(mut self, name: impl Into<String>) -> Self {
        self.politician_name = Some(name.into());
        self
    }

    pub fn with_action_type(mut self, action_type: impl Into<String>) -> Self {
        self.action_type = Some(action_type.into());
        self
    }

    pub fn with_score_change(mut self, delta: i32) -> Self {
        self.score_change = Some(delta);
        self
    }

    /// Score badge text ("+15 pts"), absent for missing or zero change
    pub fn score_badge(&self) -> Option<String> {
        match self.score_change {
            Some(delta) if delta > 0 => Some(format!("+{} pts", delta)),
            Some(delta) if delta < 0 => Some(format!("{} pts", delta)),
            _ => None,
        }
    }
}
