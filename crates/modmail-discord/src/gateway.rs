// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway transport: interactions arrive over the serenity websocket.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{Context, EventHandler, GatewayIntents, Interaction, Ready};
use serenity::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use modmail_core::ModmailError;
use modmail_interactions::Dispatcher;

use crate::convert;

struct Handler {
    dispatcher: Arc<Dispatcher>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "connected to Discord gateway"
        );
    }

    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        let Some(event) = convert::interaction_event(&interaction) else {
            debug!(kind = ?interaction.kind(), "ignoring unsupported interaction kind");
            return;
        };
        if let Err(e) = self.dispatcher.dispatch(&event).await {
            error!(error = %e, interaction_id = %event.id, "interaction handler failed");
        }
    }
}

/// Runs the gateway connection until `cancel` fires.
pub async fn run(
    token: &str,
    dispatcher: Arc<Dispatcher>,
    cancel: CancellationToken,
) -> Result<(), ModmailError> {
    let mut client = Client::builder(token, GatewayIntents::GUILDS)
        .event_handler(Handler { dispatcher })
        .await
        .map_err(|e| ModmailError::Transport {
            message: format!("failed to build gateway client: {e}"),
            source: Some(Box::new(e)),
        })?;

    let shards = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        cancel.cancelled().await;
        info!("shutting down gateway");
        shards.shutdown_all().await;
    });

    client.start().await.map_err(|e| ModmailError::Transport {
        message: format!("gateway connection failed: {e}"),
        source: Some(Box::new(e)),
    })
}
