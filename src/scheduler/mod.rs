//! Event Scheduler - one-shot toast triggers bound to an activation (v0.1)
//!
//! `activate()` spawns one tokio timer task per catalog entry (plus an
//! optional welcome trigger); `deactivate()` sweeps them. Each trigger owns a
//! `TriggerSlot`, and the slot decides the race between a timer that just
//! elapsed and a concurrent cancel: whoever takes the slot first wins, and a
//! fire that already started finishes before `deactivate()` returns.
//!
//! Presenters must not call back into the scheduler that fired them.

mod trigger;

pub use trigger::{
    default_catalog, TriggerId, TriggerKind, TriggerSlot, TriggerSpec, TriggerState,
    DEFAULT_WELCOME_DELAY_MS,
};

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::event_log::{EventKind, EventLog};
use crate::generator::{self, ContentGenerator};
use crate::identity::Identity;
use crate::presenter::ToastPresenter;

/// Owns the pending triggers of at most one activation
pub struct EventScheduler {
    generator: Arc<Mutex<ContentGenerator>>,
    event_log: EventLog,
    welcome_delay: Duration,
    activation: Option<Activation>,
    /// Woken whenever a trigger leaves `Pending`
    settled: Arc<Notify>,
}

struct Activation {
    token: CancellationToken,
    triggers: Vec<TriggerHandle>,
}

struct TriggerHandle {
    id: TriggerId,
    kind: TriggerKind,
    slot: Arc<TriggerSlot>,
    task: JoinHandle<()>,
}

/// Everything a timer task needs to fire
struct ArmedTrigger {
    id: TriggerId,
    kind: TriggerKind,
    slot: Arc<TriggerSlot>,
    token: CancellationToken,
    generator: Arc<Mutex<ContentGenerator>>,
    presenter: Arc<dyn ToastPresenter>,
    event_log: EventLog,
    settled: Arc<Notify>,
}

impl ArmedTrigger {
    async fn run(self, deadline: Instant) {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {}
            _ = tokio::time::sleep_until(deadline) => self.fire(),
        }
    }

    fn fire(&self) {
        if self.token.is_cancelled() {
            return;
        }
        // Held until the presenter returns
        let Some(_claim) = self.slot.claim() else {
            return;
        };

        let content = match &self.kind {
            TriggerKind::Catalog(tag) => self.generator.lock().generate(*tag),
            TriggerKind::Welcome { display_name } => generator::welcome(display_name),
        };

        debug!(trigger = %self.id, kind = self.kind.label(), "trigger fired");
        self.event_log.emit(EventKind::TriggerFired {
            trigger_id: self.id,
            kind: self.kind.label().to_string(),
            title: content.title.clone(),
        });
        self.presenter.present(content.into());
        self.settled.notify_waiters();
    }
}

impl EventScheduler {
    pub fn new(generator: ContentGenerator) -> Self {
        Self {
            generator: Arc::new(Mutex::new(generator)),
            event_log: EventLog::new(),
            welcome_delay: Duration::from_millis(DEFAULT_WELCOME_DELAY_MS),
            activation: None,
            settled: Arc::new(Notify::new()),
        }
    }

    pub fn with_welcome_delay(mut self, delay: Duration) -> Self {
        self.welcome_delay = delay;
        self
    }

    /// Record lifecycle events into a shared log
    pub fn with_event_log(mut self, event_log: EventLog) -> Self {
        self.event_log = event_log;
        self
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Schedule one trigger per catalog entry, offsets counted from now
    ///
    /// With an `identity`, a welcome trigger is added after the welcome
    /// delay. An active scheduler is deactivated first. Returns the number
    /// of triggers scheduled.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn activate<P>(
        &mut self,
        catalog: &[TriggerSpec],
        identity: Option<&Identity>,
        on_fire: P,
    ) -> usize
    where
        P: ToastPresenter + 'static,
    {
        if self.is_active() {
            warn!("scheduler re-activated while active, cancelling previous triggers");
            self.deactivate();
        }

        let presenter: Arc<dyn ToastPresenter> = Arc::new(on_fire);
        let token = CancellationToken::new();
        let activated_at = Instant::now();

        let mut planned: Vec<(Duration, TriggerKind)> = catalog
            .iter()
            .map(|spec| (spec.offset(), TriggerKind::Catalog(spec.tag)))
            .collect();
        if let Some(identity) = identity {
            planned.push((
                self.welcome_delay,
                TriggerKind::Welcome {
                    display_name: identity.display_name().to_string(),
                },
            ));
        }

        self.event_log.emit(EventKind::SchedulerActivated {
            trigger_count: catalog.len(),
            welcome: identity.is_some(),
        });

        let triggers: Vec<TriggerHandle> = planned
            .into_iter()
            .enumerate()
            .map(|(index, (delay, kind))| {
                let id = TriggerId(index);
                let slot = Arc::new(TriggerSlot::new());

                self.event_log.emit(EventKind::TriggerScheduled {
                    trigger_id: id,
                    kind: kind.label().to_string(),
                    offset_ms: delay.as_millis() as u64,
                });
                debug!(trigger = %id, kind = kind.label(), delay_ms = delay.as_millis() as u64, "trigger scheduled");

                let armed = ArmedTrigger {
                    id,
                    kind: kind.clone(),
                    slot: Arc::clone(&slot),
                    token: token.clone(),
                    generator: Arc::clone(&self.generator),
                    presenter: Arc::clone(&presenter),
                    event_log: self.event_log.clone(),
                    settled: Arc::clone(&self.settled),
                };
                let task = tokio::spawn(armed.run(activated_at + delay));

                TriggerHandle {
                    id,
                    kind,
                    slot,
                    task,
                }
            })
            .collect();

        let count = triggers.len();
        info!(triggers = count, "scheduler activated");
        self.activation = Some(Activation { token, triggers });
        count
    }

    /// Cancel every trigger that has not fired yet
    ///
    /// Idempotent. Returns how many triggers were cancelled by this call.
    pub fn deactivate(&mut self) -> usize {
        let Some(activation) = self.activation.take() else {
            return 0;
        };

        activation.token.cancel();

        let mut cancelled = 0;
        let mut fired = 0;
        for trigger in activation.triggers {
            if trigger.slot.cancel() {
                cancelled += 1;
                self.event_log.emit(EventKind::TriggerCancelled {
                    trigger_id: trigger.id,
                    kind: trigger.kind.label().to_string(),
                });
            } else if trigger.slot.state() == TriggerState::Fired {
                fired += 1;
            }
            trigger.task.abort();
        }

        self.event_log
            .emit(EventKind::SchedulerDeactivated { cancelled, fired });
        info!(cancelled, fired, "scheduler deactivated");
        self.settled.notify_waiters();
        cancelled
    }

    /// Resolves once no trigger of the current activation is pending
    ///
    /// Returns immediately when inactive or when everything already fired.
    pub async fn settled(&self) {
        loop {
            // Registered before the check so a fire in between is not missed
            let notified = self.settled.notified();
            if self.pending_count() == 0 {
                return;
            }
            notified.await;
        }
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    /// Triggers of the current activation still waiting to fire
    pub fn pending_count(&self) -> usize {
        self.activation
            .as_ref()
            .map(|a| {
                a.triggers
                    .iter()
                    .filter(|t| t.slot.state() == TriggerState::Pending)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Lifecycle state of every trigger in the current activation
    pub fn trigger_states(&self) -> Vec<(TriggerId, TriggerState)> {
        self.activation
            .as_ref()
            .map(|a| a.triggers.iter().map(|t| (t.id, t.slot.state())).collect())
            .unwrap_or_default()
    }
}

impl Drop for EventScheduler {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for EventScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventScheduler")
            .field("active", &self.is_active())
            .field("pending", &self.pending_count())
            .field("welcome_delay", &self.welcome_delay)
            .finish()
    }
}
