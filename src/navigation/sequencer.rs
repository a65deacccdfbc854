//! Time-sliced navigation sequences.
//!
//! # Responsibilities
//! - Diff the displayed level chain against the target destination's path
//! - Turn one deep navigation into single-level steps, one per settle window
//! - Cancel superseded steps when a level is navigated again or overwritten
//! - Prune subtrees synchronously on navigate-to-none
//!
//! # State Transitions
//! ```text
//! navigate(level, Some(target)):
//!     cancel sequences owned by level and deeper
//!     k = first index where shown screens and path(target) diverge
//!     step k       → after 0
//!     step k+1     → after settle delay, once step k applied
//!     ...
//!     last step    → apply, then prune below target depth
//!
//! navigate(level, None):
//!     cancel sequences owned by level and deeper, prune below level
//! ```
//!
//! # Design Decisions
//! - The host container corrupts its stack when two pushes land in one
//!   frame, so every step waits for the settle delay after its predecessor
//! - Steps are chained: the next timer is only armed when a step applies,
//!   so a child step can never run before its parent's
//! - A sequence is owned by the level that started it (0 = root)
//! - Applying a step at depth d counts as level d-1 navigating, so it
//!   cancels whatever d-1 and deeper levels had queued
//! - Applied steps are never undone; a newer sequence simply overwrites them

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use thiserror::Error;

use crate::navigation::destination::{divergence, Destination};
use crate::navigation::level::{LevelChain, LevelChange};
use crate::schedule::{Scheduler, TaskHandle};

/// Identifier of one navigation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

/// Timer event asking the sequencer to apply the next step of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimer {
    pub owner: usize,
    pub sequence: SequenceId,
}

/// Reasons a navigate call was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigateError {
    #[error("level {0} no longer exists")]
    LevelMissing(usize),
    #[error("destination does not descend from the screen shown at level {0}")]
    OutsideLevel(usize),
}

/// What a navigate call did synchronously.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// Levels deeper than `below` were dropped.
    Pruned { below: usize },
    /// The chain already showed the target.
    Unchanged,
    /// Steps were queued; the first one fires on the next loop turn.
    Scheduled { sequence: SequenceId, steps: usize },
}

#[derive(Debug)]
struct Sequence<D> {
    id: SequenceId,
    steps: VecDeque<(usize, D)>,
    timer: Option<TaskHandle>,
}

/// Drives the level chain towards navigation targets over time.
#[derive(Debug)]
pub struct NavigationSequencer<D> {
    chain: LevelChain<D>,
    sequences: BTreeMap<usize, Sequence<D>>,
    settle_delay: Duration,
    next_sequence: u64,
}

impl<D: Destination> NavigationSequencer<D> {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            chain: LevelChain::new(),
            sequences: BTreeMap::new(),
            settle_delay,
            next_sequence: 0,
        }
    }

    pub fn chain(&self) -> &LevelChain<D> {
        &self.chain
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Screen shown at `depth` (1-based).
    pub fn screen(&self, depth: usize) -> Option<&D> {
        self.chain.level(depth).map(|level| level.screen())
    }

    /// Deepest screen shown.
    pub fn current(&self) -> Option<&D> {
        self.chain.deepest()
    }

    /// Steps not yet applied, across all sequences.
    pub fn pending_steps(&self) -> usize {
        self.sequences.values().map(|s| s.steps.len()).sum()
    }

    /// True when no sequence is in flight.
    pub fn is_settled(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Navigate the subtree below `level` (0 = root) towards `to`.
    pub fn navigate<E: From<StepTimer>>(
        &mut self,
        level: usize,
        to: Option<D>,
        scheduler: &mut Scheduler<E>,
    ) -> Result<NavigationOutcome, NavigateError> {
        if level > 0 && self.chain.level(level).is_none() {
            return Err(NavigateError::LevelMissing(level));
        }

        let Some(to) = to else {
            self.cancel_from(level, scheduler);
            return Ok(self.prune_below(level));
        };

        let current: Vec<D> = self.chain.screens().cloned().collect();
        let next = to.path();
        if next.len() <= level || next[..level] != current[..level] {
            return Err(NavigateError::OutsideLevel(level));
        }

        self.cancel_from(level, scheduler);

        let k = divergence(&current, &next);
        if k == next.len() {
            return Ok(self.prune_below(next.len()));
        }

        let steps: VecDeque<(usize, D)> = next
            .into_iter()
            .enumerate()
            .skip(k)
            .map(|(index, screen)| (index + 1, screen))
            .collect();
        let count = steps.len();

        let id = SequenceId(self.next_sequence);
        self.next_sequence += 1;
        let timer = scheduler.after(Duration::ZERO, StepTimer { owner: level, sequence: id }.into());
        self.sequences.insert(
            level,
            Sequence {
                id,
                steps,
                timer: Some(timer),
            },
        );

        tracing::debug!(
            owner = level,
            sequence = id.0,
            from_depth = k + 1,
            steps = count,
            target = ?to,
            "Navigation sequence scheduled"
        );
        Ok(NavigationOutcome::Scheduled {
            sequence: id,
            steps: count,
        })
    }

    /// Apply the next step of the sequence named by `timer`.
    ///
    /// Returns the level changes, in order. Stale timers yield nothing.
    pub fn apply_step<E: From<StepTimer>>(
        &mut self,
        timer: StepTimer,
        scheduler: &mut Scheduler<E>,
    ) -> Vec<LevelChange<D>> {
        let step = match self.sequences.get_mut(&timer.owner) {
            Some(sequence) if sequence.id == timer.sequence => {
                sequence.timer = None;
                sequence.steps.pop_front()
            }
            _ => {
                tracing::debug!(owner = timer.owner, sequence = timer.sequence.0, "Stale navigation step ignored");
                return Vec::new();
            }
        };
        let Some((depth, screen)) = step else {
            self.sequences.remove(&timer.owner);
            return Vec::new();
        };

        // Writing depth d is level d-1 navigating: its own older steps are stale.
        self.cancel_owners(depth - 1, Some(timer.owner), scheduler);

        let mut changes = Vec::new();
        let change = self.chain.apply(depth, screen);
        tracing::debug!(owner = timer.owner, change = ?change, "Navigation step applied");

        if let LevelChange::Orphaned { .. } = change {
            tracing::warn!(owner = timer.owner, depth, "Parent level vanished, dropping sequence");
            self.sequences.remove(&timer.owner);
            changes.push(change);
            return changes;
        }
        changes.push(change);

        let finished = self
            .sequences
            .get(&timer.owner)
            .map_or(true, |sequence| sequence.steps.is_empty());
        if finished {
            self.sequences.remove(&timer.owner);
            if self.chain.truncate(depth) {
                changes.push(LevelChange::Pruned { below: depth });
            }
        } else if let Some(sequence) = self.sequences.get_mut(&timer.owner) {
            let next = StepTimer {
                owner: timer.owner,
                sequence: sequence.id,
            };
            sequence.timer = Some(scheduler.after(self.settle_delay, next.into()));
        }
        changes
    }

    /// Cancel everything and drop every level.
    pub fn reset<E>(&mut self, scheduler: &mut Scheduler<E>) -> bool {
        self.cancel_from(0, scheduler);
        self.chain.truncate(0)
    }

    fn prune_below(&mut self, depth: usize) -> NavigationOutcome {
        if self.chain.truncate(depth) {
            tracing::debug!(below = depth, "Levels pruned");
            NavigationOutcome::Pruned { below: depth }
        } else {
            NavigationOutcome::Unchanged
        }
    }

    /// Cancel sequences owned by `level` or any deeper level.
    fn cancel_from<E>(&mut self, level: usize, scheduler: &mut Scheduler<E>) -> usize {
        self.cancel_owners(level, None, scheduler)
    }

    fn cancel_owners<E>(&mut self, from: usize, except: Option<usize>, scheduler: &mut Scheduler<E>) -> usize {
        let stale: Vec<usize> = self
            .sequences
            .range(from..)
            .map(|(owner, _)| *owner)
            .filter(|owner| Some(*owner) != except)
            .collect();

        for owner in &stale {
            if let Some(sequence) = self.sequences.remove(owner) {
                if let Some(timer) = sequence.timer {
                    scheduler.cancel(timer);
                }
                tracing::debug!(
                    owner,
                    sequence = sequence.id.0,
                    remaining = sequence.steps.len(),
                    "Navigation sequence cancelled"
                );
            }
        }
        stale.len()
    }
}
