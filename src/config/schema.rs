//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routing::matcher::DEFAULT_BOUNDARY_CHARS;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavConfig {
    /// Step timing for navigation and deferred presentations.
    pub navigation: NavigationConfig,

    /// Deep-link pattern matching options.
    pub matching: MatchingConfig,

    /// Logging and event stream settings.
    pub observability: ObservabilityConfig,
}

/// Navigation timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Minimum wait between two consecutive level pushes.
    pub settle_delay_ms: u64,

    /// Wait before a released deep link presents a sheet.
    pub presentation_delay_ms: u64,
}

impl NavigationConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn presentation_delay(&self) -> Duration {
        Duration::from_millis(self.presentation_delay_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 550,
            presentation_delay_ms: 550,
        }
    }
}

/// Deep-link matching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Characters that end a prefix match without being consumed.
    pub boundary_chars: String,

    pub case_sensitive: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            boundary_chars: DEFAULT_BOUNDARY_CHARS.to_string(),
            case_sensitive: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Capacity of the router event broadcast channel.
    pub event_buffer: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            event_buffer: 256,
        }
    }
}
