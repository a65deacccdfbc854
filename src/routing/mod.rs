//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Deep link segments (["cards", "42"])
//!     → router.rs (join into "/cards/42", scan route table)
//!     → matcher.rs (evaluate compiled path pattern)
//!     → Return: resolved intent or None
//!
//! Pattern compilation (lazy, on first match):
//!     PathPattern { path, case_sensitive, match_to_end }
//!     → normalize slashes, escape literals
//!     → `:name` → ([^/]+), trailing `*` → wildcard capture
//!     → cache compiled regex inside the pattern
//! ```
//!
//! # Design Decisions
//! - Route table is immutable once built
//! - Deterministic: same input always resolves to the same route
//! - First match wins (registration order)
//! - No match is a normal outcome, never an error

pub mod matcher;
pub mod router;

pub use matcher::{compile_path, match_path, PathMatch, PathPattern, PatternError};
pub use router::DeepLinkRouter;
