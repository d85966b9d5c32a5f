// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use modmail_core::{
    InteractionEvent, InteractionResponse, MessageDraft, ModalForm, ModmailError, PlatformClient,
    TextInput, TextInputStyle,
};
use tracing::warn;

use super::InteractionHandler;
use crate::custom_id::{self, ReportConfig, ReportRoute};
use crate::routes::RouteVars;
use crate::workflow::{DESCRIPTION_INPUT, TITLE_INPUT};

/// Report button press: opens the report form, carrying the button's
/// configuration forward in the form's custom ID.
pub struct ReportButton;

#[async_trait]
impl InteractionHandler for ReportButton {
    async fn handle(
        &self,
        platform: &dyn PlatformClient,
        event: &InteractionEvent,
        _vars: &RouteVars,
    ) -> Result<(), ModmailError> {
        let identifier = event.identifier();
        let response = match custom_id::decode(&identifier) {
            Ok((_, config)) => InteractionResponse::Modal(report_form(&config)),
            Err(e) => {
                warn!(error = %e, custom_id = %identifier, "malformed report button");
                InteractionResponse::Message(MessageDraft::ephemeral(
                    "This report button is outdated or malformed. Please ask a moderator for a new one.",
                ))
            }
        };
        platform.respond(event, response).await
    }
}

/// The modal shown when a report button is pressed.
pub fn report_form(config: &ReportConfig) -> ModalForm {
    ModalForm {
        custom_id: custom_id::encode(ReportRoute::Modal, config),
        title: "Report".into(),
        inputs: vec![
            TextInput {
                custom_id: TITLE_INPUT.into(),
                label: "Subject".into(),
                style: TextInputStyle::Short,
                placeholder: Some("Subject or topic of the report".into()),
                min_length: Some(5),
                max_length: Some(72),
                required: true,
            },
            TextInput {
                custom_id: DESCRIPTION_INPUT.into(),
                label: "Description".into(),
                style: TextInputStyle::Paragraph,
                placeholder: Some(
                    "Report information\n\nMarkdown is supported.\n\
                     More details, images, etc. can be submitted afterwards."
                        .into(),
                ),
                min_length: Some(24),
                max_length: None,
                required: true,
            },
        ],
    }
}
