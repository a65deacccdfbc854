mod common;

use std::time::Duration;

use common::{card, terminated_transaction, transaction, TestApp, SETTLE};
use stacknav::app::{AppDestination, Session};
use stacknav::config::NavConfig;
use stacknav::navigation::{NavigateError, NavigationOutcome};
use stacknav::RouterEvent;

#[test]
fn test_depth_four_target_takes_three_settle_windows() {
    let mut app = TestApp::new();
    app.coordinator.sign_in(Session::demo());
    app.drain();

    let target = terminated_transaction("9", "t1");
    app.coordinator.navigate(Some(target.clone())).unwrap();
    assert!(app.coordinator.screens().is_empty());

    app.advance(Duration::ZERO);
    assert_eq!(app.coordinator.screens().len(), 1);
    app.advance(SETTLE * 2);
    assert_eq!(app.coordinator.screens().len(), 3);
    app.advance(SETTLE);
    assert_eq!(app.coordinator.screen(4), Some(&target));

    let pushed: Vec<usize> = app
        .drain()
        .into_iter()
        .filter_map(|event| match event {
            RouterEvent::LevelPushed { depth, .. } => Some(depth),
            _ => None,
        })
        .collect();
    assert_eq!(pushed, vec![1, 2, 3, 4]);
}

#[test]
fn test_switching_branch_mid_sequence() {
    let mut app = TestApp::new();
    app.coordinator.navigate(Some(terminated_transaction("9", "t1"))).unwrap();
    app.advance(SETTLE);
    assert_eq!(
        app.coordinator.screens(),
        vec![AppDestination::Account, AppDestination::TerminatedCards]
    );

    // Shares level 1, replaces level 2, and the terminated-card steps never run.
    app.coordinator.navigate(Some(AppDestination::Contact)).unwrap();
    app.advance(SETTLE * 4);
    assert_eq!(app.coordinator.screens(), vec![AppDestination::Account, AppDestination::Contact]);
    assert!(app.coordinator.is_idle());
}

#[test]
fn test_navigate_to_none_is_synchronous() {
    let mut app = TestApp::new();
    let target = AppDestination::TransactionDetails {
        card: card("1"),
        transaction: transaction("a"),
    };
    app.coordinator.navigate(Some(target)).unwrap();
    app.advance(SETTLE);
    app.drain();

    let outcome = app.coordinator.navigate(None).unwrap();
    assert_eq!(outcome, NavigationOutcome::Pruned { below: 0 });
    assert!(app.coordinator.screens().is_empty());
    assert_eq!(app.drain(), vec![RouterEvent::LevelsPruned { from_depth: 1 }]);
}

#[test]
fn test_level_navigation_after_prune_is_ignored() {
    let mut app = TestApp::new();
    app.coordinator.navigate(Some(AppDestination::Account)).unwrap();
    app.advance(Duration::ZERO);

    app.coordinator.navigate(None).unwrap();
    let err = app.coordinator.navigate_at(1, Some(AppDestination::Contact)).unwrap_err();
    assert_eq!(err, NavigateError::LevelMissing(1));
    assert!(app.coordinator.is_idle());
}

#[test]
fn test_settle_delay_is_configurable() {
    let mut config = NavConfig::default();
    config.navigation.settle_delay_ms = 100;
    let mut app = TestApp::with_config(config);

    app.coordinator.navigate(Some(AppDestination::Contact)).unwrap();
    app.advance(Duration::from_millis(100));
    assert_eq!(app.coordinator.screens(), vec![AppDestination::Account, AppDestination::Contact]);
}

#[test]
fn test_same_input_same_event_stream() {
    fn run() -> Vec<RouterEvent> {
        let mut app = TestApp::new();
        app.coordinator.sign_in(Session::demo());
        app.coordinator.navigate(Some(terminated_transaction("3", "x"))).unwrap();
        app.advance(SETTLE);
        app.coordinator.navigate(Some(AppDestination::CardDetails { card: card("3") })).unwrap();
        app.advance(SETTLE * 4);
        app.drain()
    }

    assert_eq!(run(), run());
}
