// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Modmail configuration system.

use std::io::Write;

use modmail_config::diagnostic::{ConfigError, figment_to_config_errors};
use modmail_config::model::ModmailConfig;
use modmail_config::{load_and_validate_str, load_config, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_modmail_config() {
    let toml = r#"
[discord]
token = "bot-token"
pub_key = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"

[dev_mode]
enabled = true
guild = 123456789

[http_server]
enabled = true
address = "127.0.0.1"
port = 9090
path = "/hooks/discord"

[log]
level = "debug"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should load");
    assert_eq!(config.discord.token, "bot-token");
    assert!(config.dev_mode.enabled);
    assert_eq!(config.dev_mode.guild, 123456789);
    assert!(config.http_server.enabled);
    assert_eq!(config.http_server.address, "127.0.0.1");
    assert_eq!(config.http_server.port, 9090);
    assert_eq!(config.http_server.path, "/hooks/discord");
    assert_eq!(config.log.level, "debug");
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert!(config.discord.token.is_empty());
    assert!(!config.dev_mode.enabled);
    assert_eq!(config.dev_mode.guild, 0);
    assert!(!config.http_server.enabled);
    assert_eq!(config.http_server.port, 8080);
    assert_eq!(config.http_server.path, "/interactions");
    assert_eq!(config.log.level, "info");
}

/// Defaults alone fail validation because the token is required.
#[test]
fn defaults_fail_validation_without_token() {
    let errors = load_and_validate_str("").expect_err("token is required");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Unknown field produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[discord]
tokn = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let errors = figment_to_config_errors(err);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "tokn");
            assert_eq!(suggestion.as_deref(), Some("token"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// A string where a number is expected produces InvalidType.
#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[http_server]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("port must be numeric");
    assert!(
        matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("port")),
        "got {errors:?}"
    );
}

/// `MODMAIL_*` environment variables override file values.
#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[discord]
token = "from-file"

[http_server]
port = 8000
"#,
        )?;
        jail.set_env("MODMAIL_DISCORD_TOKEN", "from-env");
        jail.set_env("MODMAIL_HTTP_SERVER_PORT", "9999");
        jail.set_env("MODMAIL_DEV_MODE_GUILD", "42");

        let config = load_config(None).expect("should load");
        assert_eq!(config.discord.token, "from-env");
        assert_eq!(config.http_server.port, 9999);
        assert_eq!(config.dev_mode.guild, 42);
        Ok(())
    });
}

/// An explicit config file overrides the local `config.toml`.
#[test]
fn explicit_file_overrides_local_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[log]
level = "warn"
"#,
        )?;

        let mut explicit = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(explicit, "[log]\nlevel = \"trace\"").expect("write temp file");

        let config = load_config(Some(explicit.path())).expect("should load");
        assert_eq!(config.log.level, "trace");
        Ok(())
    });
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    // Run inside a jail so env vars set by other tests cannot leak in.
    figment::Jail::expect_with(|_jail| {
        let config = load_config(Some(std::path::Path::new("/nonexistent/modmail.toml")))
            .expect("missing file should be skipped");
        assert_eq!(
            config.http_server.port,
            ModmailConfig::default().http_server.port
        );
        Ok(())
    });
}
