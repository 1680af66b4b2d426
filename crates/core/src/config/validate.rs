use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Transcoder path is not empty
/// - Event buffer is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.transcoder.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "transcoder.path cannot be empty".to_string(),
        ));
    }

    if config.batch.event_buffer == 0 {
        return Err(ConfigError::ValidationError(
            "batch.event_buffer cannot be 0".to_string(),
        ));
    }

    Ok(())
}
