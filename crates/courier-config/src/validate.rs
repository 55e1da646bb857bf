//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{
    Config, DISPATCH_INLINE, DISPATCH_MAIN, LOG_TARGET_FILE, LOG_TARGET_STDERR, LOG_TARGET_STDOUT,
};

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_dispatch("notifications.dispatch", &config.notifications.dispatch)?;
    validate_sms(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_dispatch(field: &str, value: &str) -> ConfigResult<()> {
    if matches!(value, DISPATCH_MAIN | DISPATCH_INLINE) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_owned(),
        message: format!(
            "unsupported dispatch mode '{value}'; expected one of: {DISPATCH_MAIN}, {DISPATCH_INLINE}"
        ),
    })
}

fn validate_sms(config: &Config) -> ConfigResult<()> {
    let s = &config.sms;

    validate_dispatch("sms.dispatch", &s.dispatch)?;

    if s.default_format.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "sms.default_format".to_owned(),
            message: "default_format must not be empty".to_owned(),
        });
    }

    if s.permissions.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "sms.permissions".to_owned(),
            message: "at least one permission is required".to_owned(),
        });
    }

    if let Some(blank) = s.permissions.iter().position(|p| p.trim().is_empty()) {
        return Err(ConfigError::ValidationError {
            field: format!("sms.permissions[{blank}]"),
            message: "permission names must not be empty".to_owned(),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    let valid_targets = [LOG_TARGET_STDERR, LOG_TARGET_STDOUT, LOG_TARGET_FILE];
    if !valid_targets.contains(&config.logging.target.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.target".to_owned(),
            message: format!(
                "unsupported log target '{}'; expected one of: {}",
                config.logging.target,
                valid_targets.join(", ")
            ),
        });
    }

    let valid_rotations = ["daily", "hourly", "never"];
    if !valid_rotations.contains(&config.logging.rotation.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.rotation".to_owned(),
            message: format!(
                "unsupported rotation '{}'; expected one of: {}",
                config.logging.rotation,
                valid_rotations.join(", ")
            ),
        });
    }

    if config.logging.target == LOG_TARGET_FILE {
        let has_directory = config
            .logging
            .directory
            .as_ref()
            .is_some_and(|dir| !dir.as_os_str().is_empty());
        if !has_directory {
            return Err(ConfigError::ValidationError {
                field: "logging.directory".to_owned(),
                message: "the file target requires a directory".to_owned(),
            });
        }
        if config.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "logging.file_prefix".to_owned(),
                message: "file_prefix must not be empty".to_owned(),
            });
        }
    }

    Ok(())
}
