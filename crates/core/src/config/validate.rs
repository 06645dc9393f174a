use regex::RegexBuilder;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Genre table does not shadow the reserved "All" label
/// - Every genre pattern source compiles as a case-insensitive regex
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Genre table validation
    if config.genres.contains_key("All") {
        return Err(ConfigError::ValidationError(
            "genre label 'All' is reserved".to_string(),
        ));
    }
    for (label, pattern) in &config.genres {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                ConfigError::ValidationError(format!(
                    "genre pattern for '{}' does not compile: {}",
                    label, e
                ))
            })?;
    }

    Ok(())
}
