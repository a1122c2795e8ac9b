//! Error types with fix suggestions (v0.1)
//!
//! Error code ranges:
//! - VOXA-000-009: Configuration / IO errors
//! - VOXA-010-019: Parsing errors (tags, locales, time scale)
//! - VOXA-020-029: Inbox seed errors
//! - VOXA-030-039: Share / clipboard errors
//!
//! Store and scheduler operations are total and never produce these.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VoxaError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum VoxaError {
    // ═══════════════════════════════════════════
    // CONFIG / IO (000-009)
    // ═══════════════════════════════════════════
    #[error("VOXA-001: Configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("VOXA-002: IO error: {0}")]
    Io(#[from] std::io::Error),

    // ═══════════════════════════════════════════
    // PARSING (010-019)
    // ═══════════════════════════════════════════
    #[error("VOXA-010: Unknown generator tag '{tag}'")]
    UnknownGeneratorTag { tag: String },

    #[error("VOXA-011: Unknown locale '{locale}'")]
    UnknownLocale { locale: String },

    #[error("VOXA-012: Invalid time scale {value} (must be a positive number)")]
    InvalidTimeScale { value: f64 },

    #[error("VOXA-013: Unknown profile kind '{kind}'")]
    UnknownProfileKind { kind: String },

    // ═══════════════════════════════════════════
    // INBOX SEED (020-029)
    // ═══════════════════════════════════════════
    #[error("VOXA-020: Invalid seed file: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    // ═══════════════════════════════════════════
    // SHARE (030-039)
    // ═══════════════════════════════════════════
    #[error("VOXA-030: Invalid share URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("VOXA-031: Clipboard unavailable: {reason}")]
    ClipboardFailed { reason: String },
}

impl FixSuggestion for VoxaError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            VoxaError::ConfigError { .. } => {
                Some("Check ~/.config/voxa/config.toml syntax or delete it to use defaults")
            }
            VoxaError::Io(_) => Some("Check file path and permissions"),
            VoxaError::UnknownGeneratorTag { .. } => Some(
                "Use one of: political_update, score_change, weekly_report, achievement, transparency_alert",
            ),
            VoxaError::UnknownLocale { .. } => Some("Use 'en' or 'pt-br'"),
            VoxaError::InvalidTimeScale { .. } => {
                Some("Use a positive factor, e.g. 0.1 to run the demo ten times faster")
            }
            VoxaError::UnknownProfileKind { .. } => Some("Use 'user' or 'politician'"),
            VoxaError::InvalidSeed(_) => {
                Some("Seed file must be a JSON array of notification objects")
            }
            VoxaError::InvalidUrl(_) => Some("Use an absolute base URL like https://voxa.app"),
            VoxaError::ClipboardFailed { .. } => {
                Some("Install pbcopy, wl-copy, xclip or xsel, or copy the printed link manually")
            }
        }
    }
}
