//! Trigger specs and per-trigger lifecycle slots

use std::fmt;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};

use crate::generator::GeneratorTag;

/// Delay used for the welcome trigger
pub const DEFAULT_WELCOME_DELAY_MS: u64 = 3000;

/// One catalog entry: fire `tag` at `offset_ms` after activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub offset_ms: u64,
    pub tag: GeneratorTag,
}

impl TriggerSpec {
    pub fn new(offset_ms: u64, tag: GeneratorTag) -> Self {
        Self { offset_ms, tag }
    }

    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.offset_ms)
    }

    /// Same trigger with its offset multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            offset_ms: (self.offset_ms as f64 * factor).round() as u64,
            tag: self.tag,
        }
    }
}

/// The seven demo triggers, 10 s to 2 min after activation
pub fn default_catalog() -> Vec<TriggerSpec> {
    use GeneratorTag::*;

    vec![
        TriggerSpec::new(10_000, PoliticalUpdate),
        TriggerSpec::new(25_000, ScoreChange),
        TriggerSpec::new(40_000, WeeklyReport),
        TriggerSpec::new(55_000, Achievement),
        TriggerSpec::new(70_000, TransparencyAlert),
        TriggerSpec::new(90_000, PoliticalUpdate),
        TriggerSpec::new(120_000, ScoreChange),
    ]
}

/// Index of a trigger within one activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub usize);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trigger#{}", self.0)
    }
}

/// What a trigger produces when it fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerKind {
    Catalog(GeneratorTag),
    Welcome { display_name: String },
}

impl TriggerKind {
    pub fn label(&self) -> &str {
        match self {
            TriggerKind::Catalog(tag) => tag.as_str(),
            TriggerKind::Welcome { .. } => "welcome",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    Pending,
    Fired,
    Cancelled,
}

/// Lifecycle cell shared between the scheduler and one timer task
///
/// `pending → fired` and `pending → cancelled` are the only transitions.
/// The fire path keeps the guard while it presents, so a cancel that
/// races with an in-flight fire waits for it to finish.
#[derive(Debug)]
pub struct TriggerSlot {
    state: Mutex<TriggerState>,
}

impl TriggerSlot {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TriggerState::Pending),
        }
    }

    pub fn state(&self) -> TriggerState {
        *self.state.lock()
    }

    /// Claim the slot for firing
    ///
    /// Returns the held guard on success; the caller runs its callback
    /// before dropping it.
    pub(crate) fn claim(&self) -> Option<MutexGuard<'_, TriggerState>> {
        let mut state = self.state.lock();
        if *state != TriggerState::Pending {
            return None;
        }
        *state = TriggerState::Fired;
        Some(state)
    }

    /// Cancel if still pending. Returns `true` on transition.
    pub fn cancel(&self) -> bool {
        let mut state = self.state.lock();
        if *state != TriggerState::Pending {
            return false;
        }
        *state = TriggerState::Cancelled;
        true
    }
}

impl Default for TriggerSlot {
    fn default() -> Self {
        Self::new()
    }
}
