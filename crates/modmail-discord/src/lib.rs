// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord adapter for Modmail.
//!
//! Implements [`PlatformClient`] over serenity's REST client and provides
//! both inbound transports: the gateway connection and the signed HTTP
//! interactions endpoint.

pub mod commands;
pub mod convert;
pub mod gateway;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serenity::all as discord;
use serenity::builder::Builder;
use serenity::http::Http;
use tokio::sync::oneshot;
use tracing::debug;

use modmail_core::{
    ActiveThread, ChannelId, GuildId, InteractionEvent, InteractionResponse, MessageDraft,
    MessageId, ModmailError, PlatformClient, PostedMessage, ThreadSpec, UserId,
};

/// An initial response handed to the HTTP request waiting for it.
#[derive(Debug)]
pub struct PendingReply {
    pub body: serde_json::Value,
    /// Fires once the body has been written to the connection.
    pub written: oneshot::Sender<()>,
}

/// Interaction ID -> sender for the HTTP body of that interaction's
/// initial response.
pub type PendingResponses = Arc<DashMap<u64, oneshot::Sender<PendingReply>>>;

/// Discord implementation of [`PlatformClient`].
///
/// Initial responses go over REST, unless the interaction arrived on the
/// HTTP endpoint and is still waiting in `pending`, in which case the
/// response becomes that request's body. Everything else is REST.
pub struct DiscordPlatform {
    http: Arc<Http>,
    pending: Option<PendingResponses>,
}

impl DiscordPlatform {
    /// Platform for the gateway transport.
    pub fn new(http: Arc<Http>) -> Self {
        Self {
            http,
            pending: None,
        }
    }

    /// Platform for the HTTP endpoint transport.
    pub fn with_pending_responses(http: Arc<Http>, pending: PendingResponses) -> Self {
        Self {
            http,
            pending: Some(pending),
        }
    }
}

/// Looks up the application ID so follow-ups and command registration work.
pub async fn connect_http(token: &str) -> Result<Arc<Http>, ModmailError> {
    let http = Http::new(token);
    let app = http
        .get_current_application_info()
        .await
        .map_err(|e| ModmailError::dependency("fetch application info", e))?;
    http.set_application_id(app.id);
    debug!(application_id = %app.id, "resolved application");
    Ok(Arc::new(http))
}

fn posted(message: &discord::Message) -> PostedMessage {
    PostedMessage {
        id: MessageId(message.id.get()),
        channel_id: ChannelId(message.channel_id.get()),
        jump_url: message.link(),
    }
}

#[async_trait]
impl PlatformClient for DiscordPlatform {
    async fn respond(
        &self,
        event: &InteractionEvent,
        response: InteractionResponse,
    ) -> Result<(), ModmailError> {
        let builder = convert::interaction_response(&response);

        if let Some((_, sender)) = self
            .pending
            .as_ref()
            .and_then(|pending| pending.remove(&event.id.get()))
        {
            let body = serde_json::to_value(&builder).map_err(|e| {
                ModmailError::Internal(format!("failed to encode interaction response: {e}"))
            })?;
            let (written, done) = oneshot::channel();
            sender
                .send(PendingReply { body, written })
                .map_err(|_| ModmailError::Transport {
                    message: "interaction request closed before its response was ready".into(),
                    source: None,
                })?;
            // Follow-ups must not overtake the initial response.
            return done.await.map_err(|_| ModmailError::Transport {
                message: "interaction request closed before its response was written".into(),
                source: None,
            });
        }

        builder
            .execute(
                &self.http,
                (discord::InteractionId::new(event.id.get()), event.token.as_str()),
            )
            .await
            .map_err(|e| ModmailError::dependency("respond to interaction", e))
    }

    async fn follow_up(
        &self,
        event: &InteractionEvent,
        message: MessageDraft,
    ) -> Result<PostedMessage, ModmailError> {
        let sent = convert::follow_up(&message)
            .execute(&self.http, (None, event.token.as_str()))
            .await
            .map_err(|e| ModmailError::dependency("send follow-up", e))?;
        Ok(posted(&sent))
    }

    async fn create_private_thread(
        &self,
        parent: ChannelId,
        spec: ThreadSpec,
    ) -> Result<ChannelId, ModmailError> {
        let thread = discord::ChannelId::new(parent.get())
            .create_thread(&self.http, convert::private_thread(&spec))
            .await
            .map_err(|e| ModmailError::dependency("create thread", e))?;
        Ok(ChannelId(thread.id.get()))
    }

    async fn post_message(
        &self,
        channel: ChannelId,
        message: MessageDraft,
    ) -> Result<PostedMessage, ModmailError> {
        let sent = discord::ChannelId::new(channel.get())
            .send_message(&self.http, convert::channel_message(&message))
            .await
            .map_err(|e| ModmailError::dependency("post message", e))?;
        Ok(posted(&sent))
    }

    async fn set_rate_limit(&self, thread: ChannelId, seconds: u16) -> Result<(), ModmailError> {
        discord::ChannelId::new(thread.get())
            .edit_thread(
                &self.http,
                discord::EditThread::new().rate_limit_per_user(seconds),
            )
            .await
            .map_err(|e| ModmailError::dependency("set thread slow mode", e))?;
        Ok(())
    }

    async fn list_active_threads(&self, guild: GuildId) -> Result<Vec<ActiveThread>, ModmailError> {
        let data = discord::GuildId::new(guild.get())
            .get_active_threads(&self.http)
            .await
            .map_err(|e| ModmailError::dependency("list active threads", e))?;
        Ok(data
            .threads
            .iter()
            .map(|thread| ActiveThread {
                id: ChannelId(thread.id.get()),
                parent_id: thread.parent_id.map(|parent| ChannelId(parent.get())),
            })
            .collect())
    }

    async fn list_thread_members(&self, thread: ChannelId) -> Result<Vec<UserId>, ModmailError> {
        let members = discord::ChannelId::new(thread.get())
            .get_thread_members(&self.http)
            .await
            .map_err(|e| ModmailError::dependency("list thread members", e))?;
        Ok(members
            .iter()
            .map(|member| UserId(member.user_id.get()))
            .collect())
    }
}
