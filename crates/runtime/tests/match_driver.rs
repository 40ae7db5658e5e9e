//! Whole matches driven by a selection provider.

mod common;

use combat_core::{CombatState, Element::*, MatchResult, Phase};
use runtime::{
    Event, RandomReels, Runtime, RuntimeError, ScriptedSelection, SelectionProvider, Topic,
};

use async_trait::async_trait;
use common::{Call, instant_config, start};

/// Scripted triple-fire rounds end the match; the terminal outcome is
/// reported exactly once and matches the final state.
#[tokio::test]
async fn scripted_match_runs_to_completion() {
    let (mut runtime, recorder) = start(instant_config()).await;
    runtime.set_selection_provider(ScriptedSelection::repeat(vec![Fire, Fire, Fire], 20));

    let result = runtime.run().await.expect("match should finish");

    assert!(result.is_terminal());
    assert_eq!(recorder.count(|c| matches!(c, Call::MatchComplete(_))), 1);
    assert_eq!(recorder.calls().last(), Some(&Call::MatchComplete(result)));

    let state = runtime.handle().state().await.expect("state query");
    assert_eq!(state.result(), result);
    assert_eq!(state.phase(), Phase::GameOver);

    // Further runs return the recorded result without playing.
    assert_eq!(runtime.run().await.expect("second run"), result);
}

/// The same seed and the same selections replay identically.
#[tokio::test]
async fn seeded_matches_are_reproducible() {
    let mut transcripts = Vec::new();

    for _ in 0..2 {
        let (mut runtime, recorder) = start(instant_config()).await;
        runtime.set_selection_provider(RandomReels::seeded(11));
        runtime.run().await.expect("match should finish");
        transcripts.push(recorder.calls());
    }

    assert_eq!(transcripts[0], transcripts[1]);
}

/// Each `step` plays exactly one round.
#[tokio::test]
async fn step_plays_one_round() {
    let (mut runtime, _recorder) = start(instant_config()).await;
    runtime.set_selection_provider(ScriptedSelection::new([
        vec![Earth, Earth, Earth],
        vec![Water, Water, Water],
    ]));

    let first = runtime.step().await.expect("first round");
    let second = runtime.step().await.expect("second round");
    assert_eq!((first.round, second.round), (1, 2));

    let err = runtime.step().await.expect_err("script exhausted");
    assert!(matches!(err, RuntimeError::SelectionExhausted));
}

#[tokio::test]
async fn step_requires_a_provider() {
    let (mut runtime, _recorder) = start(instant_config()).await;

    let err = runtime.step().await.expect_err("no provider");
    assert!(matches!(err, RuntimeError::SelectionProviderNotSet));
}

struct Blank;

#[async_trait]
impl SelectionProvider for Blank {
    async fn select(&self, _state: &CombatState) -> runtime::Result<Vec<combat_core::Element>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn empty_selection_is_an_error() {
    let (mut runtime, _recorder) = start(instant_config()).await;
    runtime.set_selection_provider(Blank);

    let err = runtime.step().await.expect_err("empty selection");
    assert!(matches!(err, RuntimeError::EmptySelection));

    // Nothing was submitted.
    let state = runtime.handle().state().await.expect("state query");
    assert_eq!(state.round(), 0);
}

/// The ordered event stream mirrors the notifier calls.
#[tokio::test]
async fn event_bus_mirrors_notifications() {
    let (mut runtime, recorder) = start(instant_config()).await;
    let mut all = runtime.handle().subscribe_all();
    let mut lifecycle = runtime.subscribe(Topic::Lifecycle);
    runtime.set_selection_provider(ScriptedSelection::new([vec![Wind, Fire, Earth]]));

    runtime.step().await.expect("round");

    let mut events = Vec::new();
    while let Ok(event) = all.try_recv() {
        events.push(event);
    }
    assert_eq!(events.len(), recorder.calls().len());
    assert_eq!(
        events.first(),
        Some(&Event::RoundStarted {
            round: 1,
            doublecast: true
        })
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::Narration { message, .. } if message.starts_with("Doublecast!")))
    );

    assert!(matches!(
        lifecycle.try_recv(),
        Ok(Event::RoundStarted { .. })
    ));
    assert!(matches!(
        lifecycle.try_recv(),
        Ok(Event::RoundComplete { round: 1 })
    ));
}

/// Events serialize to tagged JSON for transcripts.
#[test]
fn events_serialize_with_kind_tag() {
    let event = Event::MatchComplete {
        result: MatchResult::Draw,
    };
    let json = serde_json::to_value(&event).expect("serialize event");
    assert_eq!(json["kind"], "match_complete");
    assert_eq!(json["result"], "Draw");
}

#[tokio::test]
async fn shutdown_joins_worker() {
    let runtime = Runtime::builder()
        .config(instant_config())
        .build()
        .await
        .expect("runtime should build");

    runtime.shutdown().await.expect("clean shutdown");
}
