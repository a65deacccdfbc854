//! Hierarchical navigation.
//!
//! # Data Flow
//! ```text
//! navigate(level, Some(destination))
//!     → destination.rs (ancestor path, shallowest first)
//!     → sequencer.rs (diff against shown screens, queue one step per level)
//!     → Scheduler (step k now, each later step after the settle delay)
//!     → level.rs (mutate in place or attach a new level)
//!     → Return: LevelChange per applied step
//!
//! navigate(level, None)
//!     → sequencer.rs (cancel outstanding steps, prune subtree)
//! ```
//!
//! # Design Decisions
//! - The level chain is owned by the sequencer; callers only read it
//! - Steps are timer events, not closures, so cancellation is a map removal
//! - Destinations only know their parent; paths are derived

pub mod destination;
pub mod level;
pub mod sequencer;

pub use destination::{divergence, Destination};
pub use level::{LevelChain, LevelChange, RouterLevel};
pub use sequencer::{NavigateError, NavigationOutcome, NavigationSequencer, SequenceId, StepTimer};
