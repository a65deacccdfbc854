//! Nested stack navigation, modal arbitration and deferred deep links.

pub mod app;
pub mod config;
pub mod coordinator;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod presentation;
pub mod routing;
pub mod schedule;

pub use config::NavConfig;
pub use coordinator::{Coordinator, RootScreen, RouterEvent, Timer};
