// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `modmail serve` and `modmail register-commands`.

use std::sync::Arc;

use modmail_config::ModmailConfig;
use modmail_core::{ModmailError, PlatformClient};
use modmail_discord::commands::{self, CommandScope};
use modmail_discord::http::{EndpointConfig, EndpointState, parse_public_key};
use modmail_discord::{DiscordPlatform, PendingResponses};
use modmail_interactions::Dispatcher;
use tracing::{info, warn};

use crate::shutdown;

/// Registers commands, then serves interactions over the configured
/// transport until a shutdown signal arrives.
pub async fn run_serve(config: ModmailConfig) -> Result<(), ModmailError> {
    init_tracing(&config.log.level);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = transport_name(&config),
        "starting modmail"
    );

    let http = modmail_discord::connect_http(&config.discord.token).await?;
    // Commands registered by an earlier run keep working, so this is not fatal.
    if let Err(e) = commands::register(&http, command_scope(&config)).await {
        warn!(error = %e, "command registration failed, continuing with existing commands");
    }

    let cancel = shutdown::install_signal_handler();

    if config.http_server.enabled {
        let public_key = parse_public_key(&config.discord.pub_key)?;
        let pending = PendingResponses::default();
        let platform = Arc::new(DiscordPlatform::with_pending_responses(
            http,
            Arc::clone(&pending),
        ));
        let state = EndpointState {
            dispatcher: Arc::new(dispatcher(platform)?),
            pending,
            public_key,
        };
        modmail_discord::http::serve(&endpoint_config(&config), state, cancel).await?;
    } else {
        let platform = Arc::new(DiscordPlatform::new(http));
        let dispatcher = Arc::new(dispatcher(platform)?);
        modmail_discord::gateway::run(&config.discord.token, dispatcher, cancel).await?;
    }

    info!("modmail stopped");
    Ok(())
}

/// Registers commands and exits.
pub async fn run_register(config: ModmailConfig) -> Result<(), ModmailError> {
    init_tracing(&config.log.level);
    let http = modmail_discord::connect_http(&config.discord.token).await?;
    let count = commands::register(&http, command_scope(&config)).await?;
    println!(
        "modmail: registered {count} commands ({})",
        command_scope(&config).describe()
    );
    Ok(())
}

fn dispatcher(platform: Arc<dyn PlatformClient>) -> Result<Dispatcher, ModmailError> {
    Dispatcher::new(platform)
        .map_err(|e| ModmailError::Internal(format!("invalid route table: {e}")))
}

pub fn command_scope(config: &ModmailConfig) -> CommandScope {
    if config.dev_mode.enabled {
        CommandScope::Guild(config.dev_mode.guild)
    } else {
        CommandScope::Global
    }
}

pub fn transport_name(config: &ModmailConfig) -> &'static str {
    if config.http_server.enabled {
        "http"
    } else {
        "gateway"
    }
}

fn endpoint_config(config: &ModmailConfig) -> EndpointConfig {
    EndpointConfig {
        address: config.http_server.address.clone(),
        port: config.http_server.port,
        path: config.http_server.path.clone(),
    }
}

/// Initialize the tracing subscriber with an env filter.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("modmail={log_level},warn")));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
