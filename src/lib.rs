//! Voxa - notification center for the political transparency demo
//!
//! Two independent subsystems:
//! - the inbox (`NotificationStore` behind a `NotificationPanel`)
//! - the toast stream (`EventScheduler` driving `ContentGenerator` output
//!   into a `ToastPresenter`)
//!
//! Toasts are never written into the inbox.

// ═══════════════════════════════════════════
// CORE
// ═══════════════════════════════════════════
pub mod config;
pub mod error;
pub mod event_log;
pub mod identity;

// ═══════════════════════════════════════════
// INBOX
// ═══════════════════════════════════════════
pub mod notification;
pub mod panel;

// ═══════════════════════════════════════════
// TOAST STREAM
// ═══════════════════════════════════════════
pub mod generator;
pub mod presenter;
pub mod scheduler;

// ═══════════════════════════════════════════
// SHARING
// ═══════════════════════════════════════════
pub mod share;

pub use config::VoxaConfig;
pub use error::{FixSuggestion, Result, VoxaError};
pub use event_log::{Event, EventKind, EventLog};
pub use generator::{ContentGenerator, GeneratorTag, ToastContent};
pub use identity::Identity;
pub use notification::{
    format_timestamp, Locale, Notification, NotificationKind, NotificationStore, Priority,
    RelativeTime,
};
pub use panel::{NotificationPanel, PanelEntry};
pub use presenter::{
    NoopPresenter, RecordingPresenter, TerminalPresenter, Toast, ToastPresenter, ToastVariant,
    TracingPresenter,
};
pub use scheduler::{EventScheduler, TriggerId, TriggerSpec, TriggerState};
pub use share::{share_profile, ProfileKind, ProfileLink, ShareOutcome};
