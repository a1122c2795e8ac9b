//! ToastPresenter Trait - transient message surface (v0.1)
//!
//! The scheduler and the share flow hand finished toasts to a presenter and
//! never look at the result. Implementations:
//! - `TerminalPresenter`: colored box on stdout (CLI demo)
//! - `TracingPresenter`: logs each toast at INFO
//! - `NoopPresenter`: discards everything
//! - `RecordingPresenter`: keeps every toast for assertions

use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use parking_lot::Mutex;
use serde::Serialize;

use crate::generator::ToastContent;

/// Presentation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub message: String,
    /// `None` lets the presenter pick its own duration
    pub duration_ms: Option<u64>,
    pub variant: ToastVariant,
    /// Points delta carried over from generated content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_change: Option<i32>,
}

impl Toast {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            duration_ms: None,
            variant: ToastVariant::Default,
            score_change: None,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn destructive(mut self) -> Self {
        self.variant = ToastVariant::Destructive;
        self
    }
}

impl From<ToastContent> for Toast {
    fn from(content: ToastContent) -> Self {
        let mut toast = Toast::new(content.title, content.message)
            .with_duration_ms(content.display_duration_ms);
        toast.score_change = content.score_change;
        toast
    }
}

/// Surface that shows toasts (fire-and-forget)
pub trait ToastPresenter: Send + Sync {
    fn present(&self, toast: Toast);
}

impl<P: ToastPresenter + ?Sized> ToastPresenter for Arc<P> {
    fn present(&self, toast: Toast) {
        (**self).present(toast)
    }
}

// ═══════════════════════════════════════════════════════════════
// Implementations
// ═══════════════════════════════════════════════════════════════

/// Discards every toast
#[derive(Debug, Clone, Default)]
pub struct NoopPresenter;

impl ToastPresenter for NoopPresenter {
    fn present(&self, _toast: Toast) {}
}

/// Logs toasts through `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingPresenter;

impl ToastPresenter for TracingPresenter {
    fn present(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => tracing::info!(
                title = %toast.title,
                duration_ms = ?toast.duration_ms,
                "{}",
                toast.message
            ),
            ToastVariant::Destructive => tracing::warn!(
                title = %toast.title,
                duration_ms = ?toast.duration_ms,
                "{}",
                toast.message
            ),
        }
    }
}

/// Records toasts in order (tests, replay)
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of toasts presented so far
    pub fn count(&self) -> usize {
        self.toasts.lock().len()
    }

    /// All toasts (cloned)
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.lock().last().cloned()
    }
}

impl ToastPresenter for RecordingPresenter {
    fn present(&self, toast: Toast) {
        self.toasts.lock().push(toast);
    }
}

/// Prints toasts as a colored block on stdout
#[derive(Debug, Clone, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    fn render(toast: &Toast) -> String {
        let bar = match toast.variant {
            ToastVariant::Default => "│".magenta(),
            ToastVariant::Destructive => "│".red(),
        };
        let title = match toast.variant {
            ToastVariant::Default => toast.title.bold(),
            ToastVariant::Destructive => toast.title.red().bold(),
        };
        let duration = toast
            .duration_ms
            .map(|ms| format!(" ({:.1}s)", ms as f64 / 1000.0))
            .unwrap_or_default();

        format!(
            "{} {}{}\n{} {}",
            bar,
            title,
            duration.dimmed(),
            bar,
            toast.message
        )
    }
}

impl ToastPresenter for TerminalPresenter {
    fn present(&self, toast: Toast) {
        let mut stdout = std::io::stdout().lock();
        // stdout may already be closed (piped into `head`)
        let _ = writeln!(stdout, "{}\n", Self::render(&toast));
    }
}
