//! Integration tests for the mascot running behind its async driver
//!
//! These tests drive a [`MascotDriver`] the way a surface does: inputs go in
//! through the handle, views come out through the watch channel, and time is
//! advanced with tokio's paused clock so timer behavior is exact.
//!
//! Tests cover:
//! - Full hover / leave / click / settle lifecycle
//! - Stale click reset timers being dropped
//! - Particle burst size and clearing
//! - Streak and message-set properties across many seeds
//! - Signal precedence when several flags are set at once

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tokio_test::assert_ok;

use swifter_core::mascot::phrases;
use swifter_core::{
    load_config_from_path, Expression, MascotController, MascotDriver, MascotHandle, MascotInput,
    MascotTimings, Mood, PipelineTracker, Platform, PostResult, SignalSet, Variant,
    PARTICLE_BURST_SIZE,
};

fn spawn(variant: Variant, seed: u64) -> MascotHandle {
    MascotDriver::spawn(MascotController::with_seed(
        variant,
        MascotTimings::for_variant(variant),
        seed,
    ))
}

/// Let the driver drain its queue without moving the clock meaningfully
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

// =============================================================================
// Test 1: Lifecycle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_hover_leave_click_settle() {
    let handle = spawn(Variant::Enhanced, 1);
    let mounted = handle.view();
    assert_eq!(mounted.mood, Mood::Idle);
    assert_eq!(mounted.expression, Expression::Happy);
    assert!(!mounted.has_activity());
    assert!((1..=15).contains(&mounted.streak));
    assert!((1..=5).contains(&mounted.level));

    assert_ok!(handle.send(MascotInput::PointerEnter).await);
    settle().await;
    let hovered = handle.view();
    assert_eq!(hovered.mood, Mood::Excited);
    assert_eq!(hovered.expression, Expression::Mischievous);
    assert_eq!(hovered.activity, phrases::level_greeting(mounted.level));
    assert!(hovered.tooltip.is_some());

    assert_ok!(handle.send(MascotInput::PointerLeave).await);
    settle().await;
    let left = handle.view();
    assert_eq!(left.mood, Mood::Idle);
    assert_eq!(left.expression, Expression::Happy);
    assert!(!left.has_activity());
    assert_eq!(left.tooltip, None);

    assert_ok!(handle.send(MascotInput::Click).await);
    settle().await;
    let clicked = handle.view();
    assert_eq!(clicked.mood, Mood::Celebrating);
    assert_eq!(clicked.expression, Expression::Excited);
    assert_eq!(clicked.activity, phrases::streak_cheer(mounted.streak));
    assert_eq!(clicked.streak, mounted.streak + 1);
    assert_eq!(clicked.particles.len(), PARTICLE_BURST_SIZE);

    // Particles go first
    tokio::time::sleep(Duration::from_millis(2000)).await;
    let cleared = handle.view();
    assert!(cleared.particles.is_empty());
    assert_eq!(cleared.mood, Mood::Celebrating);

    // Then the enhanced celebration ends at 4 s
    tokio::time::sleep(Duration::from_millis(2000)).await;
    let idle = handle.view();
    assert_eq!(idle.mood, Mood::Idle);
    assert_eq!(idle.expression, Expression::Happy);
    assert!(!idle.has_activity());
    assert_eq!(idle.streak, mounted.streak + 1);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_classic_resets_after_three_seconds() {
    let handle = spawn(Variant::Classic, 2);

    assert_ok!(handle.send(MascotInput::Click).await);
    settle().await;

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert_eq!(handle.view().mood, Mood::Celebrating);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.view().mood, Mood::Idle);

    handle.shutdown().await;
}

// =============================================================================
// Test 2: Stale Timers
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_reset_does_not_clobber_later_signal() {
    let handle = spawn(Variant::Enhanced, 3);

    assert_ok!(handle.send(MascotInput::Click).await);
    settle().await;

    tokio::time::sleep(Duration::from_millis(1000)).await;
    handle
        .send(MascotInput::Signals(SignalSet::generating()))
        .await
        .unwrap();
    settle().await;

    // Well past the click's reset deadline
    tokio::time::sleep(Duration::from_secs(10)).await;
    let view = handle.view();
    assert_eq!(view.mood, Mood::Working);
    assert_eq!(view.activity, phrases::GENERATING);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_second_click_restarts_celebration() {
    let handle = spawn(Variant::Classic, 4);

    assert_ok!(handle.send(MascotInput::Click).await);
    settle().await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_ok!(handle.send(MascotInput::Click).await);
    settle().await;

    // First click's deadline passes
    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(handle.view().mood, Mood::Celebrating);

    // Second click's deadline
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(handle.view().mood, Mood::Idle);

    handle.shutdown().await;
}

// =============================================================================
// Test 3: Pipeline Outcomes
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_pipeline_success_bursts_and_clears() {
    let handle = spawn(Variant::Enhanced, 5);
    let start = handle.view().streak;
    let mut tracker = PipelineTracker::new();

    handle
        .send(MascotInput::Signals(tracker.begin_generation()))
        .await
        .unwrap();
    settle().await;
    assert_eq!(handle.view().mood, Mood::Working);

    let signals = tracker.finish(&[PostResult::posted(Platform::Mastodon, "42")]);
    handle.send(MascotInput::Signals(signals)).await.unwrap();
    settle().await;

    let view = handle.view();
    assert_eq!(view.mood, Mood::Celebrating);
    assert_eq!(view.expression, Expression::Success);
    assert!(phrases::MOTIVATIONAL.contains(&view.activity.as_str()));
    assert_eq!(view.streak, start + 1);
    assert_eq!(view.particles.len(), PARTICLE_BURST_SIZE);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    let view = handle.view();
    assert!(view.particles.is_empty());
    // Signal-driven celebrations stay until the next input
    assert_eq!(view.mood, Mood::Celebrating);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_failure_is_encouraging() {
    let handle = spawn(Variant::Classic, 6);
    let start = handle.view().streak;
    let mut tracker = PipelineTracker::new();

    tracker.begin_generation();
    let signals = tracker.finish(&[PostResult::failed(Platform::Reddit, "rate limited")]);
    handle.send(MascotInput::Signals(signals)).await.unwrap();
    settle().await;

    let view = handle.view();
    assert_eq!(view.mood, Mood::Error);
    assert_eq!(view.expression, Expression::Concerned);
    assert!(phrases::ENCOURAGING.contains(&view.activity.as_str()));
    assert_eq!(view.streak, start);
    assert!(view.particles.is_empty());

    handle.shutdown().await;
}

// =============================================================================
// Test 4: Properties Across Seeds
// =============================================================================

#[test]
fn test_streak_never_decreases() {
    let inputs = [
        MascotInput::PointerEnter,
        MascotInput::Signals(SignalSet::success()),
        MascotInput::Click,
        MascotInput::Signals(SignalSet::failure()),
        MascotInput::PointerLeave,
        MascotInput::Signals(SignalSet::generating()),
        MascotInput::Click,
        MascotInput::Signals(SignalSet::CLEAR),
    ];

    for seed in 0..100 {
        let mut controller =
            MascotController::with_seed(Variant::Enhanced, MascotTimings::default(), seed);
        let start = Instant::now();
        let mut last = controller.state().streak;

        for (i, input) in inputs.iter().enumerate() {
            let now = start + Duration::from_millis(700 * i as u64);
            controller.tick(now);
            controller.handle(*input, now);
            let streak = controller.state().streak;
            assert!(streak >= last, "seed {seed}: streak went {last} -> {streak}");
            last = streak;
        }
    }
}

#[test]
fn test_messages_come_from_their_sets() {
    for seed in 0..100 {
        let now = Instant::now();

        let mut ok = MascotController::with_seed(Variant::Classic, MascotTimings::default(), seed);
        ok.handle(MascotInput::Signals(SignalSet::success()), now);
        assert!(phrases::MOTIVATIONAL.contains(&ok.state().activity.as_str()));

        let mut bad = MascotController::with_seed(Variant::Classic, MascotTimings::default(), seed);
        bad.handle(MascotInput::Signals(SignalSet::failure()), now);
        assert!(phrases::ENCOURAGING.contains(&bad.state().activity.as_str()));
    }
}

#[test]
fn test_seeded_controllers_agree() {
    let now = Instant::now();
    let mut a = MascotController::with_seed(Variant::Enhanced, MascotTimings::default(), 77);
    let mut b = MascotController::with_seed(Variant::Enhanced, MascotTimings::default(), 77);

    for input in [
        MascotInput::Click,
        MascotInput::Signals(SignalSet::success()),
    ] {
        a.handle(input, now);
        b.handle(input, now);
    }
    assert_eq!(a.view(), b.view());
}

// =============================================================================
// Test 5: Signal Precedence
// =============================================================================

#[test]
fn test_generating_wins_over_outcomes() {
    let now = Instant::now();
    let mut controller =
        MascotController::with_seed(Variant::Enhanced, MascotTimings::default(), 9);
    let start = controller.state().streak;

    controller.handle(
        MascotInput::Signals(SignalSet {
            content_generating: true,
            post_success: true,
            post_failure: true,
        }),
        now,
    );

    assert_eq!(controller.state().mood, Mood::Working);
    assert_eq!(controller.state().streak, start);
}

#[test]
fn test_success_wins_over_failure() {
    let now = Instant::now();
    let mut controller =
        MascotController::with_seed(Variant::Enhanced, MascotTimings::default(), 9);

    controller.handle(
        MascotInput::Signals(SignalSet {
            content_generating: false,
            post_success: true,
            post_failure: true,
        }),
        now,
    );

    assert_eq!(controller.state().mood, Mood::Celebrating);
}

// =============================================================================
// Test 6: Configuration Feeds The Controller
// =============================================================================

#[test]
fn test_config_file_drives_variant() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.toml");
    std::fs::write(
        &path,
        "[mascot]\nvariant = \"classic\"\nseed = 5\n\n[session]\npath = \"/tmp/s.json\"\n",
    )
    .unwrap();

    let config = load_config_from_path(Some(path.clone())).unwrap();
    assert_eq!(config.config_file_path, Some(path));

    let mut controller = config.mascot_controller();
    controller.handle(MascotInput::PointerEnter, Instant::now());
    assert_eq!(controller.state().mood, Mood::Active);
    assert_eq!(controller.state().activity, phrases::CLASSIC_GREETING);
}
