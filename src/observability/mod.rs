//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, one target per module)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG or config)
//!     → RouterEvent broadcast (coordinator) for state observers
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs the subscriber
//! - RUST_LOG wins over the configured level

pub mod logging;

pub use logging::init;
