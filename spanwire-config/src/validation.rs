//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate that a log level is one `tracing` understands.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new("^(?i)(trace|debug|info|warn|error)$")
        .map_err(|_| ValidationError::new("invalid_regex"))?;
    if re.is_match(level) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_levels() {
        for level in ["trace", "debug", "info", "WARN", "Error"] {
            assert!(validate_log_level(level).is_ok(), "{level}");
        }
    }

    #[test]
    fn rejects_unknown_levels() {
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("").is_err());
        assert!(validate_log_level("info,spanwire=debug").is_err());
    }
}
