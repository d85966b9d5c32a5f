// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Modmail report bot.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, `MODMAIL_*`
//! environment overrides, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use modmail_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("gateway mode: {}", !config.http_server.enabled);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_str};
pub use model::ModmailConfig;

/// Load configuration from the file hierarchy and validate it.
///
/// `explicit` is an additional config file (the `--config` flag) merged
/// after the standard locations and before environment variables.
pub fn load_and_validate(explicit: Option<&Path>) -> Result<ModmailConfig, Vec<ConfigError>> {
    let config = loader::load_config(explicit).map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    tracing::debug!(
        http_server = config.http_server.enabled,
        dev_mode = config.dev_mode.enabled,
        "configuration loaded"
    );
    Ok(config)
}

/// Renders the effective configuration as TOML with the bot token
/// redacted. The public key is not secret and is shown as is.
pub fn render_effective(config: &ModmailConfig) -> Result<String, ConfigError> {
    let mut shown = config.clone();
    if !shown.discord.token.is_empty() {
        shown.discord.token = "[redacted]".into();
    }
    toml::to_string_pretty(&shown).map_err(|e| ConfigError::Other(e.to_string()))
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<ModmailConfig, Vec<ConfigError>> {
    let config =
        loader::load_config_from_str(toml_content).map_err(diagnostic::figment_to_config_errors)?;
    validation::validate_config(&config)?;
    Ok(config)
}
