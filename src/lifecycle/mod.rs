//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Deep link while signed out (gate.rs):
//!     store action → sign in → release once → run (or schedule after delay)
//!
//! Timers (driver.rs):
//!     tokio: sleep until next deadline → coordinator.run_due() → repeat
//!     manual: advance clock deadline by deadline → coordinator.run_due()
//! ```
//!
//! # Design Decisions
//! - The driver stops once nothing is scheduled, or on the shutdown future
//! - Only one pending action; a newer one replaces it

pub mod driver;
pub mod gate;

pub use driver::{advance, run_until_idle, DriveOutcome};
pub use gate::{GateDecision, PendingAction, PendingActionGate};
