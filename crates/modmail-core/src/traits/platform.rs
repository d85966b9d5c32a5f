// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform client trait for the chat platform's REST surface.

use async_trait::async_trait;

use crate::error::ModmailError;
use crate::message::{InteractionResponse, MessageDraft, ThreadSpec};
use crate::types::{ActiveThread, ChannelId, GuildId, InteractionEvent, PostedMessage, UserId};

/// Every platform call the interaction core needs.
///
/// Each method is a suspension point. Implementations must not retry:
/// interaction responses have a hard platform deadline, so failures are
/// returned to the caller, which decides whether they are fatal.
#[async_trait]
pub trait PlatformClient: Send + Sync + 'static {
    /// Sends the initial response to an interaction.
    async fn respond(
        &self,
        event: &InteractionEvent,
        response: InteractionResponse,
    ) -> Result<(), ModmailError>;

    /// Sends a follow-up message after the initial response.
    async fn follow_up(
        &self,
        event: &InteractionEvent,
        message: MessageDraft,
    ) -> Result<PostedMessage, ModmailError>;

    /// Creates a private thread under `parent`.
    async fn create_private_thread(
        &self,
        parent: ChannelId,
        spec: ThreadSpec,
    ) -> Result<ChannelId, ModmailError>;

    /// Posts a permanent message into a channel or thread.
    async fn post_message(
        &self,
        channel: ChannelId,
        message: MessageDraft,
    ) -> Result<PostedMessage, ModmailError>;

    /// Sets the per-user slow mode of a thread, in seconds.
    async fn set_rate_limit(&self, thread: ChannelId, seconds: u16) -> Result<(), ModmailError>;

    /// Lists every active thread of a guild.
    async fn list_active_threads(&self, guild: GuildId) -> Result<Vec<ActiveThread>, ModmailError>;

    /// Lists the user IDs that are members of a thread.
    async fn list_thread_members(&self, thread: ChannelId) -> Result<Vec<UserId>, ModmailError>;
}
