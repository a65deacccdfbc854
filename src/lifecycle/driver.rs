//! Timer drivers for the coordinator.

use std::future::Future;
use std::time::Duration;

use crate::coordinator::Coordinator;
use crate::schedule::{Clock, ManualClock, TokioClock};

/// Why `run_until_idle` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// Nothing left to schedule.
    Idle,
    /// The shutdown future completed first.
    Shutdown,
}

/// Fire timers on real time until the coordinator is idle or `shutdown` resolves.
///
/// `clock` must be the clock the coordinator was built with.
pub async fn run_until_idle<F>(coordinator: &mut Coordinator, clock: &TokioClock, shutdown: F) -> DriveOutcome
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        let fired = coordinator.run_due();
        if fired > 0 {
            tracing::trace!(fired, "Timers fired");
        }

        let Some(deadline) = coordinator.next_deadline() else {
            tracing::debug!("Coordinator idle");
            return DriveOutcome::Idle;
        };

        tokio::select! {
            _ = tokio::time::sleep_until(clock.instant_at(deadline)) => {}
            _ = &mut shutdown => {
                tracing::info!(pending_deadline_ms = deadline.as_millis() as u64, "Shutdown requested");
                return DriveOutcome::Shutdown;
            }
        }
    }
}

/// Move a manual clock forward by `by`, firing each timer at its own deadline.
///
/// Returns the number of timers fired.
pub fn advance(coordinator: &mut Coordinator, clock: &ManualClock, by: Duration) -> usize {
    let target = clock.now() + by;
    let mut fired = 0;
    loop {
        fired += coordinator.run_due();
        match coordinator.next_deadline() {
            Some(deadline) if deadline <= target => clock.advance_to(deadline),
            _ => break,
        }
    }
    clock.advance_to(target);
    fired
}
