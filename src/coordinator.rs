//! Application coordinator.
//!
//! # Responsibilities
//! - Own every piece of navigation state for one application session
//! - Be the single place where timers, deep links and flow outputs are handled
//! - Publish a `RouterEvent` for every observable state change
//!
//! # Data Flow
//! ```text
//! navigate / request / open_url / process / sign_in / sign_out
//!     → sequencer, presentation queue, pending-action gate
//!     → Scheduler<Timer> (steps, deferred deep links)
//!     → broadcast::Sender<RouterEvent>
//!
//! driver (tokio or manual clock)
//!     → run_due() → handle_timer(Timer) → same state machines
//! ```
//!
//! # Design Decisions
//! - Concrete over the application's destinations and sheets
//! - Events are published even when nobody listens; send errors are ignored
//! - The gate's ready signal follows the root screen

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;

use crate::app::{deep_links, AppDestination, DeepLink, FlowOutput, Intent, Session, Sheet, MAX_DEPTH};
use crate::config::NavConfig;
use crate::lifecycle::gate::{GateDecision, PendingAction, PendingActionGate};
use crate::navigation::{Destination, LevelChange, NavigateError, NavigationOutcome, NavigationSequencer, StepTimer};
use crate::presentation::{Presentation, PresentationChange, PresentationQueue};
use crate::routing::router::join_segments;
use crate::routing::DeepLinkRouter;
use crate::schedule::{Clock, Scheduler, TaskHandle};

/// Screen shown beneath every level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "root", content = "session", rename_all = "snake_case")]
pub enum RootScreen {
    Login,
    Home(Session),
}

impl RootScreen {
    pub fn session(&self) -> Option<&Session> {
        match self {
            RootScreen::Login => None,
            RootScreen::Home(session) => Some(session),
        }
    }
}

/// Events the coordinator schedules for itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Timer {
    /// Next step of a navigation sequence.
    Step(StepTimer),
    /// A released deep link waiting for the presentation delay.
    Deferred(Intent),
}

impl From<StepTimer> for Timer {
    fn from(step: StepTimer) -> Self {
        Timer::Step(step)
    }
}

/// Observable state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouterEvent {
    RootChanged { screen: RootScreen },
    LevelPushed { depth: usize, screen: AppDestination },
    LevelReplaced { depth: usize, screen: AppDestination },
    LevelsPruned { from_depth: usize },
    PresentationShown { presentation: Presentation<Sheet> },
    PresentationDismissing { queued: Presentation<Sheet> },
    PresentationCleared,
    PendingActionStored { intent: Intent, extra_delay: bool, replaced: bool },
    PendingActionFired { intent: Intent, extra_delay: bool },
}

pub struct Coordinator {
    config: NavConfig,
    root: RootScreen,
    sequencer: NavigationSequencer<AppDestination>,
    presentations: PresentationQueue<Sheet>,
    gate: PendingActionGate<Intent>,
    timers: Scheduler<Timer>,
    links: DeepLinkRouter<DeepLink>,
    deferred: Option<TaskHandle>,
    events: broadcast::Sender<RouterEvent>,
}

impl Coordinator {
    pub fn new(config: NavConfig, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(config.observability.event_buffer.max(1));
        Self {
            root: RootScreen::Login,
            sequencer: NavigationSequencer::new(config.navigation.settle_delay()),
            presentations: PresentationQueue::new(),
            gate: PendingActionGate::new(false),
            timers: Scheduler::new(clock),
            links: deep_links(&config.matching),
            deferred: None,
            events,
            config,
        }
    }

    /// Receive every `RouterEvent` published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RouterEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn root(&self) -> &RootScreen {
        &self.root
    }

    /// Screen shown at `depth` (1-based).
    pub fn screen(&self, depth: usize) -> Option<&AppDestination> {
        self.sequencer.screen(depth)
    }

    /// Screens from level 1 to the deepest shown.
    pub fn screens(&self) -> Vec<AppDestination> {
        self.sequencer.chain().screens().cloned().collect()
    }

    pub fn presentation(&self) -> Option<&Presentation<Sheet>> {
        self.presentations.current()
    }

    pub fn queued_presentation(&self) -> Option<&Presentation<Sheet>> {
        self.presentations.queued()
    }

    pub fn pending_action(&self) -> Option<&PendingAction<Intent>> {
        self.gate.pending()
    }

    /// True when no navigation step or deferred deep link is outstanding.
    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// True while a released deep link waits for the presentation delay.
    pub fn has_deferred_link(&self) -> bool {
        self.deferred.map_or(false, |handle| self.timers.is_pending(handle))
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Navigate from the root.
    pub fn navigate(&mut self, to: Option<AppDestination>) -> Result<NavigationOutcome, NavigateError> {
        self.navigate_at(0, to)
    }

    /// Navigate the subtree beneath `level`.
    pub fn navigate_at(
        &mut self,
        level: usize,
        to: Option<AppDestination>,
    ) -> Result<NavigationOutcome, NavigateError> {
        debug_assert!(to.as_ref().map_or(true, |d| d.depth() <= MAX_DEPTH));
        match self.sequencer.navigate(level, to, &mut self.timers) {
            Ok(outcome) => {
                if let NavigationOutcome::Pruned { below } = outcome {
                    self.emit(RouterEvent::LevelsPruned { from_depth: below + 1 });
                }
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(level, error = %err, "Navigation ignored");
                Err(err)
            }
        }
    }

    pub fn request(&mut self, presentation: Option<Presentation<Sheet>>) -> PresentationChange<Sheet> {
        let change = self.presentations.request(presentation);
        self.emit_presentation(&change);
        change
    }

    /// The host finished dismissing the visible modal.
    pub fn on_dismiss_completed(&mut self) -> PresentationChange<Sheet> {
        let change = self.presentations.on_dismiss_completed();
        self.emit_presentation(&change);
        change
    }

    /// Run `intent` now if signed in, otherwise once a session appears.
    pub fn run_when_ready(&mut self, extra_delay: bool, intent: Intent) {
        match self.gate.run_when_ready(extra_delay, intent.clone()) {
            GateDecision::RunNow(intent) => self.perform(intent),
            GateDecision::Deferred { replaced } => {
                self.emit(RouterEvent::PendingActionStored {
                    intent,
                    extra_delay,
                    replaced,
                });
            }
        }
    }

    /// Dispatch a deep link given as path segments. Returns false if no route matched.
    pub fn open_url<S: AsRef<str>>(&mut self, segments: &[S]) -> bool {
        let path = join_segments(segments);
        let Some((route, link)) = self.links.resolve_path(&path) else {
            tracing::info!(%path, "Deep link ignored");
            return false;
        };

        tracing::info!(%path, route, gated = link.gated, "Deep link opened");
        if link.gated {
            self.run_when_ready(link.extra_delay, link.intent);
        } else {
            self.perform(link.intent);
        }
        true
    }

    pub fn sign_in(&mut self, session: Session) {
        tracing::info!("Signed in");
        self.set_root(RootScreen::Home(session));
        self.request(None);

        let Some(pending) = self.gate.set_ready(true) else {
            return;
        };
        self.emit(RouterEvent::PendingActionFired {
            intent: pending.action.clone(),
            extra_delay: pending.extra_delay,
        });
        if pending.extra_delay {
            if let Some(stale) = self.deferred.take() {
                self.timers.cancel(stale);
            }
            let delay = self.config.navigation.presentation_delay();
            self.deferred = Some(self.timers.after(delay, Timer::Deferred(pending.action)));
        } else {
            self.perform(pending.action);
        }
    }

    pub fn sign_out(&mut self) {
        tracing::info!("Signed out");
        self.set_root(RootScreen::Login);
        self.request(None);
        if self.sequencer.reset(&mut self.timers) {
            self.emit(RouterEvent::LevelsPruned { from_depth: 1 });
        }
        if let Some(deferred) = self.deferred.take() {
            self.timers.cancel(deferred);
        }
        self.gate.set_ready(false);
    }

    /// Handle the outcome reported by a sheet's flow.
    pub fn process(&mut self, output: FlowOutput) {
        tracing::debug!(output = ?output, "Flow output");
        match output {
            FlowOutput::Session(session) => self.sign_in(session),
            FlowOutput::MfaChallenge(challenge) => {
                self.request(Some(Presentation::sheet(Sheet::MfaChallenge(challenge))));
            }
            FlowOutput::MfaEnrollment(requirement) => {
                self.request(Some(Presentation::sheet(Sheet::MfaEnrollment(requirement))));
            }
            FlowOutput::PersonalDetails => {
                self.request(Some(Presentation::sheet(Sheet::PersonalDetails)));
            }
            FlowOutput::BiometricPrompt => {
                self.request(Some(Presentation::sheet(Sheet::BiometricPrompt)));
            }
            FlowOutput::Completed => {
                self.request(None);
            }
        }
    }

    /// Handle every timer that is due. Returns how many fired.
    pub fn run_due(&mut self) -> usize {
        let mut fired = 0;
        while let Some((_, timer)) = self.timers.pop_due() {
            self.handle_timer(timer);
            fired += 1;
        }
        fired
    }

    pub fn handle_timer(&mut self, timer: Timer) {
        match timer {
            Timer::Step(step) => {
                let changes = self.sequencer.apply_step(step, &mut self.timers);
                for change in changes {
                    self.emit_level(change);
                }
            }
            Timer::Deferred(intent) => {
                self.deferred = None;
                self.perform(intent);
            }
        }
    }

    fn perform(&mut self, intent: Intent) {
        match intent {
            Intent::Navigate(to) => match self.navigate(to) {
                Ok(outcome) => tracing::debug!(outcome = ?outcome, "Intent navigation applied"),
                Err(err) => tracing::debug!(error = %err, "Intent navigation dropped"),
            },
            Intent::Present(presentation) => {
                self.request(presentation);
            }
            Intent::SignIn(session) => self.sign_in(session),
        }
    }

    fn set_root(&mut self, screen: RootScreen) {
        if self.root == screen {
            return;
        }
        self.root = screen.clone();
        self.emit(RouterEvent::RootChanged { screen });
    }

    fn emit_level(&self, change: LevelChange<AppDestination>) {
        let event = match change {
            LevelChange::Pushed { depth, screen } => RouterEvent::LevelPushed { depth, screen },
            LevelChange::Replaced { depth, screen } => RouterEvent::LevelReplaced { depth, screen },
            LevelChange::Pruned { below } => RouterEvent::LevelsPruned { from_depth: below + 1 },
            LevelChange::Unchanged { .. } | LevelChange::Orphaned { .. } => return,
        };
        self.emit(event);
    }

    fn emit_presentation(&self, change: &PresentationChange<Sheet>) {
        let event = match change {
            PresentationChange::Shown(presentation) => RouterEvent::PresentationShown {
                presentation: presentation.clone(),
            },
            PresentationChange::Dismissing { queued } => RouterEvent::PresentationDismissing {
                queued: queued.clone(),
            },
            PresentationChange::Cleared | PresentationChange::Resynchronized => RouterEvent::PresentationCleared,
            PresentationChange::Unchanged => return,
        };
        self.emit(event);
    }

    fn emit(&self, event: RouterEvent) {
        tracing::trace!(event = ?event, "Router event");
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("root", &self.root)
            .field("screens", &self.screens())
            .field("presentation", &self.presentations.current())
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}
