//! Application domain: destinations, sheets and deep links.
//!
//! # Responsibilities
//! - Define the closed destination hierarchy the navigation stack walks
//! - Define the sheet catalog and the outcomes sheet flows report
//! - Map deep-link paths to intents

pub mod destination;
pub mod links;
pub mod sheet;
pub mod types;

pub use destination::{AppDestination, MAX_DEPTH};
pub use links::{deep_links, DeepLink, Intent};
pub use sheet::{FlowOutput, Sheet};
pub use types::{Card, CardTransaction, MfaChallengeRequirement, MfaEnrollmentRequirement, Session};
