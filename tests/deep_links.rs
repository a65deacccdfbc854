mod common;

use std::time::Duration;

use common::{card, TestApp, SETTLE};
use stacknav::app::{AppDestination, FlowOutput, Intent, Session, Sheet};
use stacknav::presentation::Presentation;
use stacknav::{RootScreen, RouterEvent};

#[test]
fn test_link_before_sign_in_fires_exactly_once() {
    let mut app = TestApp::new();
    assert!(app.coordinator.open_url(&["account", "profile"]));
    assert_eq!(
        app.drain(),
        vec![RouterEvent::PendingActionStored {
            intent: Intent::Navigate(Some(AppDestination::Contact)),
            extra_delay: false,
            replaced: false,
        }]
    );

    app.coordinator.sign_in(Session::demo());
    app.advance(SETTLE);
    assert_eq!(app.coordinator.screens(), vec![AppDestination::Account, AppDestination::Contact]);

    let fired = app
        .drain()
        .iter()
        .filter(|e| matches!(e, RouterEvent::PendingActionFired { .. }))
        .count();
    assert_eq!(fired, 1);

    // Readiness toggling again never replays the action.
    app.coordinator.navigate(None).unwrap();
    app.coordinator.sign_out();
    app.coordinator.sign_in(Session::demo());
    app.advance(SETTLE * 2);
    assert!(app.coordinator.screens().is_empty());
}

#[test]
fn test_newer_link_replaces_pending_one() {
    let mut app = TestApp::new();
    app.coordinator.open_url(&["cards", "1"]);
    app.coordinator.open_url(&["cards", "2"]);

    app.coordinator.open_url(&["login"]);
    app.advance(Duration::ZERO);
    assert_eq!(
        app.coordinator.screens(),
        vec![AppDestination::CardDetails { card: card("2") }]
    );
}

#[test]
fn test_links_run_immediately_when_signed_in() {
    let mut app = TestApp::new();
    app.coordinator.sign_in(Session::demo());
    app.coordinator.open_url(&["cards", "42"]);
    app.advance(Duration::ZERO);
    assert_eq!(app.coordinator.screen(1), Some(&AppDestination::CardDetails { card: card("42") }));

    app.coordinator.open_url(&["cards"]);
    assert!(app.coordinator.screens().is_empty());

    app.coordinator.open_url(&["account", "anything", "else"]);
    app.advance(Duration::ZERO);
    assert_eq!(app.coordinator.screens(), vec![AppDestination::Account]);
}

#[test]
fn test_request_card_waits_for_login_sheet_to_dismiss() {
    let mut app = TestApp::new();
    app.coordinator.request(Some(Presentation::sheet(Sheet::Login)));
    app.coordinator.open_url(&["request-card"]);

    // Login flow completes: sign-in clears the login sheet.
    app.coordinator.process(FlowOutput::Session(Session::demo()));
    app.coordinator.on_dismiss_completed();
    assert!(app.coordinator.presentation().is_none());

    app.advance(SETTLE);
    assert_eq!(
        app.coordinator.presentation(),
        Some(&Presentation::sheet(Sheet::RequestCard))
    );
}

#[test]
fn test_unknown_link_is_a_noop() {
    let mut app = TestApp::new();
    assert!(!app.coordinator.open_url(&["settings", "privacy"]));
    assert!(app.drain().is_empty());
    assert_eq!(app.coordinator.root(), &RootScreen::Login);
}
