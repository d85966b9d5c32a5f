// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup: `/etc/modmail/config.toml` < `~/.config/modmail/config.toml` <
//! `./config.toml` < explicit `--config` file < `MODMAIL_*` environment.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ModmailConfig;

/// Config file name searched in every directory of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level sections, used to map `MODMAIL_SECTION_KEY` to `section.key`.
const SECTIONS: &[&str] = &["discord", "dev_mode", "http_server", "log"];

/// Load configuration from the standard hierarchy with env var overrides.
///
/// `explicit` is the optional `--config` path given on the command line.
pub fn load_config(explicit: Option<&Path>) -> Result<ModmailConfig, figment::Error> {
    build_figment(explicit).extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<ModmailConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ModmailConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment(explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(ModmailConfig::default()));
    for path in search_paths() {
        figment = figment.merge(Toml::file(path));
    }
    if let Some(path) = explicit {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Config files consulted in merge order (later overrides earlier).
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("/etc/modmail").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("modmail").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Environment provider mapping `MODMAIL_HTTP_SERVER_PORT` to `http_server.port`.
///
/// Section names contain underscores themselves, so the key is matched
/// against the known section list instead of being split on `_`.
fn env_provider() -> Env {
    Env::prefixed("MODMAIL_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
