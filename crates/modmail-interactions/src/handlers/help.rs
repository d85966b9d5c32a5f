// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use modmail_core::{
    Embed, InteractionEvent, InteractionResponse, MessageDraft, ModmailError, PlatformClient,
};

use super::InteractionHandler;
use crate::routes::RouteVars;

/// Body of the `/help` embed.
pub const HELP_TEXT: &str = include_str!("help.md");

pub const HELP_COLOR: u32 = 0x20FF20;

/// `/help`: usage guide. Public in DMs, ephemeral inside a guild.
pub struct Help;

#[async_trait]
impl InteractionHandler for Help {
    async fn handle(
        &self,
        platform: &dyn PlatformClient,
        event: &InteractionEvent,
        _vars: &RouteVars,
    ) -> Result<(), ModmailError> {
        let message = MessageDraft {
            ephemeral: event.in_guild(),
            ..MessageDraft::default()
        }
        .with_embed(Embed {
            title: Some("Modmail Help".into()),
            description: Some(HELP_TEXT.trim().to_string()),
            color: Some(HELP_COLOR),
            author: None,
        });
        platform
            .respond(event, InteractionResponse::Message(message))
            .await
    }
}
