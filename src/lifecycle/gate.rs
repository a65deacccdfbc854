//! Pending-action gate.
//!
//! Holds at most one action until the ready signal (a signed-in session)
//! turns on, then hands it back exactly once.

/// An action waiting for the gate to open.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction<A> {
    pub action: A,
    /// Run after the presentation settle delay instead of immediately.
    pub extra_delay: bool,
}

/// What `run_when_ready` decided.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision<A> {
    /// The gate is open; run the action now.
    RunNow(A),
    /// Stored until ready. `replaced` is true if an older action was dropped.
    Deferred { replaced: bool },
}

#[derive(Debug, Clone)]
pub struct PendingActionGate<A> {
    ready: bool,
    pending: Option<PendingAction<A>>,
}

impl<A> Default for PendingActionGate<A> {
    fn default() -> Self {
        Self {
            ready: false,
            pending: None,
        }
    }
}

impl<A: std::fmt::Debug> PendingActionGate<A> {
    pub fn new(ready: bool) -> Self {
        Self {
            ready,
            pending: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn pending(&self) -> Option<&PendingAction<A>> {
        self.pending.as_ref()
    }

    pub fn run_when_ready(&mut self, extra_delay: bool, action: A) -> GateDecision<A> {
        if self.ready {
            return GateDecision::RunNow(action);
        }

        tracing::debug!(action = ?action, extra_delay, "Action deferred until ready");
        let replaced = self
            .pending
            .replace(PendingAction { action, extra_delay })
            .is_some();
        GateDecision::Deferred { replaced }
    }

    /// Update the ready signal.
    ///
    /// Returns the pending action only on a false → true transition; the
    /// slot is emptied before the action is handed out.
    pub fn set_ready(&mut self, ready: bool) -> Option<PendingAction<A>> {
        let opened = ready && !self.ready;
        self.ready = ready;
        if !opened {
            return None;
        }
        let pending = self.pending.take();
        if let Some(pending) = &pending {
            tracing::debug!(action = ?pending.action, extra_delay = pending.extra_delay, "Pending action released");
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_immediately_when_ready() {
        let mut gate = PendingActionGate::new(true);
        assert_eq!(gate.run_when_ready(false, "open"), GateDecision::RunNow("open"));
        assert!(gate.pending().is_none());
    }

    #[test]
    fn test_latest_deferred_action_wins() {
        let mut gate = PendingActionGate::new(false);
        assert_eq!(gate.run_when_ready(false, "first"), GateDecision::Deferred { replaced: false });
        assert_eq!(gate.run_when_ready(true, "second"), GateDecision::Deferred { replaced: true });

        let fired = gate.set_ready(true);
        assert_eq!(
            fired,
            Some(PendingAction {
                action: "second",
                extra_delay: true
            })
        );
    }

    #[test]
    fn test_fires_at_most_once() {
        let mut gate = PendingActionGate::new(false);
        gate.run_when_ready(false, "open");

        assert!(gate.set_ready(true).is_some());
        assert!(gate.set_ready(true).is_none());
        assert!(gate.set_ready(false).is_none());
        assert!(gate.set_ready(true).is_none());
    }

    #[test]
    fn test_pending_survives_until_ready() {
        let mut gate = PendingActionGate::default();
        gate.run_when_ready(false, 7);
        assert!(gate.set_ready(false).is_none());
        assert_eq!(gate.pending().map(|p| p.action), Some(7));
        assert_eq!(gate.set_ready(true).map(|p| p.action), Some(7));
        assert!(gate.is_ready());
    }
}
