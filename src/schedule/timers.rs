//! Cancellable delayed events.
//!
//! # Responsibilities
//! - Queue events against a deadline computed from the injected clock
//! - Hand back a `TaskHandle` for synchronous cancellation
//! - Release due events in deadline order, FIFO among equal deadlines
//!
//! # Design Decisions
//! - Keyed by `(deadline, id)` in a `BTreeMap`: ordering and FIFO for free
//! - Events are released one at a time so that events scheduled while
//!   handling a due event (with zero delay) are picked up in the same turn

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use crate::schedule::clock::Clock;

/// Handle to a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Single-threaded timer queue.
#[derive(Debug)]
pub struct Scheduler<E> {
    clock: Arc<dyn Clock>,
    queue: BTreeMap<(Duration, u64), E>,
    deadlines: HashMap<u64, Duration>,
    next_id: u64,
}

impl<E> Scheduler<E> {
    /// Create an empty scheduler reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Schedule `event` to become due after `delay`.
    pub fn after(&mut self, delay: Duration, event: E) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;

        let deadline = self.clock.now().saturating_add(delay);
        self.queue.insert((deadline, id), event);
        self.deadlines.insert(id, deadline);

        tracing::trace!(task = id, delay_ms = delay.as_millis() as u64, "Task scheduled");
        TaskHandle(id)
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => {
                self.queue.remove(&(deadline, handle.0));
                tracing::trace!(task = handle.0, "Task cancelled");
                true
            }
            None => false,
        }
    }

    /// Returns true while the task is still waiting to fire.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Number of tasks waiting to fire.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Deadline of the earliest pending task, as an offset on the clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Remove and return the earliest task whose deadline has passed.
    pub fn pop_due(&mut self) -> Option<(TaskHandle, E)> {
        let now = self.clock.now();
        let key = *self.queue.keys().next()?;
        if key.0 > now {
            return None;
        }

        let event = self.queue.remove(&key)?;
        self.deadlines.remove(&key.1);
        Some((TaskHandle(key.1), event))
    }
}
