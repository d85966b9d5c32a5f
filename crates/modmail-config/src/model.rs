// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Modmail report bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Modmail configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModmailConfig {
    /// Bot credentials.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Single-guild command registration for development.
    #[serde(default)]
    pub dev_mode: DevModeConfig,

    /// Outgoing-webhook interactions endpoint.
    #[serde(default)]
    pub http_server: HttpServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Bot credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Bot token. Required.
    #[serde(default)]
    pub token: String,

    /// Hex-encoded Ed25519 application public key.
    /// Required when the HTTP interactions endpoint is enabled.
    #[serde(default)]
    pub pub_key: String,
}

/// Development mode: commands are registered to one guild, which applies instantly.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DevModeConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Guild that receives the commands. Must be non-zero when enabled.
    #[serde(default)]
    pub guild: u64,
}

/// HTTP interactions endpoint settings.
///
/// When disabled the bot receives interactions over the gateway instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpServerConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Address to bind.
    #[serde(default = "default_address")]
    pub address: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Route that receives interaction webhooks.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: default_address(),
            port: default_port(),
            path: default_path(),
        }
    }
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/interactions".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
