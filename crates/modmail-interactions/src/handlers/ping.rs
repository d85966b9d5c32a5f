// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use modmail_core::{InteractionEvent, InteractionResponse, MessageDraft, ModmailError, PlatformClient};

use super::InteractionHandler;
use crate::routes::RouteVars;

/// `/ping`: liveness check.
pub struct Ping;

#[async_trait]
impl InteractionHandler for Ping {
    async fn handle(
        &self,
        platform: &dyn PlatformClient,
        event: &InteractionEvent,
        _vars: &RouteVars,
    ) -> Result<(), ModmailError> {
        platform
            .respond(
                event,
                InteractionResponse::Message(MessageDraft::ephemeral("Pong!")),
            )
            .await
    }
}
