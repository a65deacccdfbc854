mod common;

use common::TestApp;
use stacknav::app::{FlowOutput, MfaEnrollmentRequirement, Sheet};
use stacknav::presentation::{Presentation, PresentationChange};
use stacknav::RouterEvent;

fn enrollment() -> MfaEnrollmentRequirement {
    MfaEnrollmentRequirement {
        mfa_token: "mfa-token".to_string(),
    }
}

#[test]
fn test_second_request_shows_after_dismissal() {
    let mut app = TestApp::new();
    app.coordinator.request(Some(Presentation::sheet(Sheet::Login)));
    app.coordinator.process(FlowOutput::MfaEnrollment(enrollment()));

    assert!(app.coordinator.presentation().is_none());
    assert_eq!(
        app.coordinator.on_dismiss_completed(),
        PresentationChange::Shown(Presentation::sheet(Sheet::MfaEnrollment(enrollment())))
    );

    assert_eq!(
        app.drain(),
        vec![
            RouterEvent::PresentationShown {
                presentation: Presentation::sheet(Sheet::Login)
            },
            RouterEvent::PresentationDismissing {
                queued: Presentation::sheet(Sheet::MfaEnrollment(enrollment()))
            },
            RouterEvent::PresentationShown {
                presentation: Presentation::sheet(Sheet::MfaEnrollment(enrollment()))
            },
        ]
    );
}

#[test]
fn test_full_screen_cover_and_sheet_share_one_slot() {
    let mut app = TestApp::new();
    app.coordinator.request(Some(Presentation::full_screen_cover(Sheet::Attachment)));
    app.coordinator.request(Some(Presentation::sheet(Sheet::Comment)));

    assert!(app.coordinator.presentation().is_none());
    app.coordinator.on_dismiss_completed();
    assert_eq!(app.coordinator.presentation(), Some(&Presentation::sheet(Sheet::Comment)));
}

#[test]
fn test_none_request_drops_queued_presentation() {
    let mut app = TestApp::new();
    app.coordinator.request(Some(Presentation::sheet(Sheet::PersonalDetails)));
    app.coordinator.process(FlowOutput::BiometricPrompt);
    app.coordinator.process(FlowOutput::Completed);

    assert_eq!(app.coordinator.on_dismiss_completed(), PresentationChange::Unchanged);
    assert!(app.coordinator.presentation().is_none());
    assert!(app.coordinator.queued_presentation().is_none());
}

#[test]
fn test_swipe_dismissal_is_reported_as_cleared() {
    let mut app = TestApp::new();
    app.coordinator.request(Some(Presentation::sheet(Sheet::AddAttachment)));
    app.drain();

    assert_eq!(app.coordinator.on_dismiss_completed(), PresentationChange::Resynchronized);
    assert_eq!(app.drain(), vec![RouterEvent::PresentationCleared]);
}

#[test]
fn test_request_while_dismissing_replaces_queued_presentation() {
    let mut app = TestApp::new();
    app.coordinator.request(Some(Presentation::sheet(Sheet::Login)));
    app.coordinator.process(FlowOutput::MfaEnrollment(enrollment()));
    assert!(app.coordinator.queued_presentation().is_some());

    // Login is still animating out when the flow moves on.
    let change = app.coordinator.request(Some(Presentation::sheet(Sheet::PersonalDetails)));
    assert_eq!(change, PresentationChange::Shown(Presentation::sheet(Sheet::PersonalDetails)));
    assert!(app.coordinator.queued_presentation().is_none());
    app.drain();

    assert_eq!(app.coordinator.on_dismiss_completed(), PresentationChange::Unchanged);
    assert_eq!(
        app.coordinator.presentation(),
        Some(&Presentation::sheet(Sheet::PersonalDetails))
    );
    assert!(app.coordinator.queued_presentation().is_none());
    assert!(app.drain().is_empty());
}
