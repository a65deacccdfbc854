//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (delays > 0, buffer > 0)
//! - Reject boundary characters that would break path matching
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NavConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::NavConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("navigation.settle_delay_ms must be greater than zero")]
    ZeroSettleDelay,

    #[error("matching.boundary_chars contains invalid character {0:?}")]
    InvalidBoundaryChar(char),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("observability.event_buffer must be greater than zero")]
    ZeroEventBuffer,
}

pub fn validate_config(config: &NavConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.navigation.settle_delay_ms == 0 {
        errors.push(ValidationError::ZeroSettleDelay);
    }

    for c in config.matching.boundary_chars.chars() {
        if c == '/' || c.is_alphanumeric() || c == '_' || c.is_whitespace() {
            errors.push(ValidationError::InvalidBoundaryChar(c));
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.observability.event_buffer == 0 {
        errors.push(ValidationError::ZeroEventBuffer);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&NavConfig::default()).is_ok());
    }

    #[test]
    fn test_boundary_chars() {
        let mut config = NavConfig::default();
        config.matching.boundary_chars = ".a/".to_string();
        assert_eq!(
            validate_config(&config),
            Err(vec![
                ValidationError::InvalidBoundaryChar('a'),
                ValidationError::InvalidBoundaryChar('/'),
            ])
        );
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let mut config = NavConfig::default();
        config.observability.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_event_buffer() {
        let mut config = NavConfig::default();
        config.observability.event_buffer = 0;
        assert_eq!(validate_config(&config), Err(vec![ValidationError::ZeroEventBuffer]));
    }
}
