//! Modal presentation arbitration.
//!
//! # Data Flow
//! ```text
//! request(Some(p)) while nothing visible  → Shown(p)
//! request(Some(p)) while a modal visible  → Dismissing (p queued)
//!     → host finishes dismissing → on_dismiss_completed() → Shown(p)
//! request(None)                           → Cleared (both slots)
//! ```
//!
//! # Design Decisions
//! - One visible slot and one queued slot; the latest request always wins
//! - The host's dismissal animation is the only thing that promotes the queue

pub mod queue;

pub use queue::{Presentation, PresentationChange, PresentationQueue, PresentationStyle};
