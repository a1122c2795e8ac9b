//! Scheduler lifecycle log (v0.1)
//!
//! Audit trail of every trigger transition.
//! - Event: envelope with id + timestamp + kind
//! - EventKind: 5 variants across 2 levels (scheduler/trigger)
//! - EventLog: thread-safe, append-only log shared with timer tasks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scheduler::TriggerId;

/// Single entry in the lifecycle log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic sequence ID (for ordering)
    pub id: u64,
    /// Time since log creation (ms)
    pub timestamp_ms: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    // ═══════════════════════════════════════════
    // SCHEDULER LEVEL
    // ═══════════════════════════════════════════
    SchedulerActivated {
        trigger_count: usize,
        welcome: bool,
    },
    SchedulerDeactivated {
        cancelled: usize,
        fired: usize,
    },

    // ═══════════════════════════════════════════
    // TRIGGER LEVEL
    // ═══════════════════════════════════════════
    TriggerScheduled {
        trigger_id: TriggerId,
        kind: String,
        offset_ms: u64,
    },
    TriggerFired {
        trigger_id: TriggerId,
        kind: String,
        title: String,
    },
    TriggerCancelled {
        trigger_id: TriggerId,
        kind: String,
    },
}

impl EventKind {
    /// Extract trigger_id if event is trigger-related
    pub fn trigger_id(&self) -> Option<TriggerId> {
        match self {
            Self::TriggerScheduled { trigger_id, .. }
            | Self::TriggerFired { trigger_id, .. }
            | Self::TriggerCancelled { trigger_id, .. } => Some(*trigger_id),
            Self::SchedulerActivated { .. } | Self::SchedulerDeactivated { .. } => None,
        }
    }

    pub fn is_fire(&self) -> bool {
        matches!(self, Self::TriggerFired { .. })
    }
}

/// Thread-safe, append-only event log
#[derive(Clone)]
pub struct EventLog {
    events: Arc<RwLock<Vec<Event>>>,
    start_time: Instant,
    next_id: Arc<AtomicU64>,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            start_time: Instant::now(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Emit an event (thread-safe, returns event ID)
    pub fn emit(&self, kind: EventKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let event = Event {
            id,
            timestamp_ms: self.start_time.elapsed().as_millis() as u64,
            kind,
        };

        self.events.write().push(event);
        id
    }

    /// Get all events (cloned)
    pub fn events(&self) -> Vec<Event> {
        self.events.read().clone()
    }

    /// Events of one trigger, in emission order
    pub fn filter_trigger(&self, trigger_id: TriggerId) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.kind.trigger_id() == Some(trigger_id))
            .collect()
    }

    /// Number of fire events across all activations
    pub fn fired_count(&self) -> usize {
        self.events.read().iter().filter(|e| e.kind.is_fire()).count()
    }

    /// Serialize to JSON for debugging (`voxa demo --trace`)
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.events()).unwrap_or(Value::Null)
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("len", &self.len())
            .finish()
    }
}
