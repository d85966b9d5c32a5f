// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use modmail_core::{InteractionEvent, InteractionResponse, ModmailError, PlatformClient};
use tracing::debug;

use super::InteractionHandler;
use crate::routes::RouteVars;
use crate::workflow::ReportWorkflow;

/// Report form submission: defers, then runs the report workflow.
pub struct ReportModal;

#[async_trait]
impl InteractionHandler for ReportModal {
    async fn handle(
        &self,
        platform: &dyn PlatformClient,
        event: &InteractionEvent,
        _vars: &RouteVars,
    ) -> Result<(), ModmailError> {
        // Thread creation and membership checks can outlast the initial
        // response deadline.
        platform
            .respond(event, InteractionResponse::Defer { ephemeral: true })
            .await?;

        let run = ReportWorkflow::new(platform, event).run().await?;
        debug!(transitions = ?run.transitions, "report transitions");
        Ok(())
    }
}
