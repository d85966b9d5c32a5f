// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::ModmailConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &ModmailConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.discord.token.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "discord.token must not be empty".to_string(),
        });
    }

    if config.http_server.enabled {
        let key = config.discord.pub_key.trim();
        if key.is_empty() {
            errors.push(ConfigError::Validation {
                message: "discord.pub_key is required when http_server.enabled is true"
                    .to_string(),
            });
        } else if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push(ConfigError::Validation {
                message: "discord.pub_key must be 64 hexadecimal characters".to_string(),
            });
        }

        if config.http_server.port == 0 {
            errors.push(ConfigError::Validation {
                message: "http_server.port must be non-zero".to_string(),
            });
        }

        if !config.http_server.path.starts_with('/') {
            errors.push(ConfigError::Validation {
                message: format!(
                    "http_server.path `{}` must start with `/`",
                    config.http_server.path
                ),
            });
        }

        if config.http_server.address.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "http_server.address must not be empty".to_string(),
            });
        }
    }

    if config.dev_mode.enabled && config.dev_mode.guild == 0 {
        errors.push(ConfigError::Validation {
            message: "dev_mode.guild must be set when dev_mode.enabled is true".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
