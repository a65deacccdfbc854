//! Delayed dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Coordinator wants something later (navigation step, deferred deep link):
//!     → timers.rs (Scheduler::after: deadline = clock.now() + delay)
//!     → TaskHandle returned for cancellation
//!
//! Event loop turn:
//!     → clock.rs (Clock::now)
//!     → timers.rs (pop_due: earliest deadline first, FIFO on ties)
//!     → Coordinator::handle_timer(event)
//! ```
//!
//! # Design Decisions
//! - Timers carry tagged events, not closures; the owner interprets them
//! - Time is injected through the `Clock` trait so tests never sleep
//! - Cancellation is synchronous: a cancelled task can never fire
//! - The settle delay is a plain constant, not a deadline that can fail

pub mod clock;
pub mod timers;

pub use clock::{Clock, ManualClock, TokioClock};
pub use timers::{Scheduler, TaskHandle};
