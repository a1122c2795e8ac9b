//! Event Scheduler integration tests (v0.1)
//!
//! All tests run on tokio's paused clock: `advance()` moves virtual time,
//! `settle()` lets spawned timer tasks observe it.
//!
//! ## Test Categories
//!
//! 1. Timing - nothing fires early, each trigger fires once
//! 2. Cancellation - deactivate, re-activation, drop
//! 3. Content - generated toasts stay within catalog bounds

use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::advance;

use voxa::scheduler::{default_catalog, EventScheduler, TriggerId, TriggerSpec, TriggerState};
use voxa::{
    ContentGenerator, EventKind, EventLog, GeneratorTag, Identity, NoopPresenter, RecordingPresenter,
};

// ============================================================================
// TEST HELPERS
// ============================================================================

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

async fn advance_ms(ms: u64) {
    advance(Duration::from_millis(ms)).await;
    settle().await;
}

fn scheduler(seed: u64) -> EventScheduler {
    EventScheduler::new(ContentGenerator::seeded(seed))
}

// ============================================================================
// 1. TIMING
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_two_trigger_scenario() {
    let mut scheduler = scheduler(1);
    let recorder = RecordingPresenter::new();
    let catalog = [
        TriggerSpec::new(10_000, GeneratorTag::PoliticalUpdate),
        TriggerSpec::new(25_000, GeneratorTag::ScoreChange),
    ];

    scheduler.activate(&catalog, None, recorder.clone());

    advance_ms(9_999).await;
    assert_eq!(recorder.count(), 0);

    advance_ms(2).await;
    assert_eq!(recorder.count(), 1);
    assert!(recorder.last().unwrap().title.starts_with("Nova Ação: "));

    assert_eq!(scheduler.deactivate(), 1);

    advance_ms(20_000).await;
    assert_eq!(recorder.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_each_trigger_fires_exactly_once() {
    let mut scheduler = scheduler(2);
    let recorder = RecordingPresenter::new();

    let armed = scheduler.activate(&default_catalog(), None, recorder.clone());
    assert_eq!(armed, 7);

    advance_ms(121_000).await;
    assert_eq!(recorder.count(), 7);
    assert_eq!(scheduler.pending_count(), 0);

    advance_ms(600_000).await;
    assert_eq!(recorder.count(), 7);
    assert_eq!(scheduler.deactivate(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_default_catalog_fires_in_offset_order() {
    let mut scheduler = scheduler(3);
    let recorder = RecordingPresenter::new();
    scheduler.activate(&default_catalog(), None, recorder.clone());

    let mut now = 0u64;
    let mut seen = Vec::new();
    for offset in [10_000u64, 25_000, 40_000, 55_000, 70_000, 90_000, 120_000] {
        advance_ms(offset + 1 - now).await;
        now = offset + 1;
        seen.push(recorder.count());
    }
    assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);

    let titles: Vec<String> = recorder.toasts().into_iter().map(|t| t.title).collect();
    assert!(titles[2].contains("Relatório Semanal Disponível"));
    assert!(titles[4].contains("Alerta de Transparência"));
}

#[tokio::test(start_paused = true)]
async fn test_welcome_toast_fires_before_catalog() {
    let mut scheduler = scheduler(4);
    let recorder = RecordingPresenter::new();
    let identity = Identity::from_email("joao@voxa.app");

    let armed = scheduler.activate(&default_catalog(), Some(&identity), recorder.clone());
    assert_eq!(armed, 8);

    advance_ms(3_001).await;
    assert_eq!(recorder.count(), 1);
    assert!(recorder.last().unwrap().title.contains("joao"));
    assert_eq!(recorder.last().unwrap().duration_ms, Some(6_000));
}

#[tokio::test(start_paused = true)]
async fn test_no_identity_skips_welcome() {
    let mut scheduler = scheduler(5);
    let recorder = RecordingPresenter::new();

    scheduler.activate(&default_catalog(), None, recorder.clone());
    advance_ms(9_000).await;
    assert_eq!(recorder.count(), 0);
}

// ============================================================================
// 2. CANCELLATION
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_deactivate_before_any_offset_presents_nothing() {
    let mut scheduler = scheduler(6);
    let recorder = RecordingPresenter::new();

    scheduler.activate(&default_catalog(), None, recorder.clone());
    advance_ms(5_000).await;

    assert_eq!(scheduler.deactivate(), 7);
    assert_eq!(scheduler.deactivate(), 0);

    advance_ms(200_000).await;
    assert_eq!(recorder.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_reactivation_cancels_previous_set() {
    let mut scheduler = scheduler(7);
    let first = RecordingPresenter::new();
    let second = RecordingPresenter::new();
    let catalog = [TriggerSpec::new(1_000, GeneratorTag::WeeklyReport)];

    scheduler.activate(&catalog, None, first.clone());
    advance_ms(500).await;
    scheduler.activate(&catalog, None, second.clone());

    advance_ms(1_200).await;
    assert_eq!(first.count(), 0);
    assert_eq!(second.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_triggers() {
    let recorder = RecordingPresenter::new();
    let log = EventLog::new();
    {
        let mut scheduler = scheduler(8).with_event_log(log.clone());
        scheduler.activate(&default_catalog(), None, recorder.clone());
        advance_ms(11_000).await;
    }

    advance_ms(200_000).await;
    assert_eq!(recorder.count(), 1);
    assert!(matches!(
        log.events().last().unwrap().kind,
        EventKind::SchedulerDeactivated {
            cancelled: 6,
            fired: 1
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_settled_waits_for_every_trigger() {
    let mut scheduler = scheduler(10);
    let recorder = RecordingPresenter::new();
    scheduler.activate(&default_catalog(), None, recorder.clone());

    tokio::time::timeout(Duration::from_secs(300), scheduler.settled())
        .await
        .unwrap();

    assert_eq!(recorder.count(), 7);
    assert_eq!(scheduler.deactivate(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_noop_presenter_still_logs_fires() {
    let log = EventLog::new();
    let mut scheduler = scheduler(11).with_event_log(log.clone());

    scheduler.activate(&default_catalog(), None, NoopPresenter);
    advance_ms(56_000).await;

    assert_eq!(log.fired_count(), 4);
    assert_eq!(scheduler.pending_count(), 3);
    assert_eq!(scheduler.deactivate(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_deactivate_after_partial_fire() {
    let mut scheduler = scheduler(9);
    let recorder = RecordingPresenter::new();

    scheduler.activate(&default_catalog(), None, recorder.clone());
    advance_ms(41_000).await;
    assert_eq!(recorder.count(), 3);

    let states = scheduler.trigger_states();
    assert_eq!(states[2], (TriggerId(2), TriggerState::Fired));
    assert_eq!(states[3], (TriggerId(3), TriggerState::Pending));

    assert_eq!(scheduler.deactivate(), 4);
    advance_ms(100_000).await;
    assert_eq!(recorder.count(), 3);
}

// ============================================================================
// 3. CONTENT
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_fired_score_changes_are_bounded() {
    for seed in 0..20 {
        let mut scheduler = scheduler(seed);
        let recorder = RecordingPresenter::new();
        let catalog = [
            TriggerSpec::new(100, GeneratorTag::PoliticalUpdate),
            TriggerSpec::new(200, GeneratorTag::ScoreChange),
        ];
        scheduler.activate(&catalog, None, recorder.clone());
        advance_ms(300).await;

        let toasts = recorder.toasts();
        assert_eq!(toasts.len(), 2);
        let update = toasts[0].score_change.unwrap();
        let score = toasts[1].score_change.unwrap();
        assert!((-10..=10).contains(&update), "update delta {}", update);
        assert!((5..=20).contains(&score), "score delta {}", score);
        assert!(toasts[1].message.contains(&format!("+{}", score)));
    }
}

#[tokio::test(start_paused = true)]
async fn test_same_seed_same_content() {
    let mut titles = Vec::new();
    for _ in 0..2 {
        let mut scheduler = scheduler(42);
        let recorder = RecordingPresenter::new();
        scheduler.activate(&default_catalog(), None, recorder.clone());
        advance_ms(121_000).await;
        titles.push(
            recorder
                .toasts()
                .into_iter()
                .map(|t| t.message)
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(titles[0], titles[1]);
}
