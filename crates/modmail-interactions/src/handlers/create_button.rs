// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use modmail_core::{
    Button, ButtonStyle, CommandData, InteractionData, InteractionEvent, InteractionResponse,
    MessageDraft, ModmailError, PlatformClient,
};
use strum::{Display, EnumString};
use tracing::debug;

use super::{InteractionHandler, MAX_ACTIVE_LIMIT, names};
use crate::custom_id::{self, ReportConfig, ReportRoute};
use crate::duration::{MAX_SLOW_MODE, parse_duration};
use crate::routes::RouteVars;

/// Colour choices offered by `/create-report-button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ButtonColor {
    Red,
    Green,
    #[default]
    Blue,
    Grey,
}

impl ButtonColor {
    pub fn style(self) -> ButtonStyle {
        match self {
            ButtonColor::Red => ButtonStyle::Danger,
            ButtonColor::Green => ButtonStyle::Success,
            ButtonColor::Blue => ButtonStyle::Primary,
            ButtonColor::Grey => ButtonStyle::Secondary,
        }
    }
}

/// `/create-report-button`: posts a button carrying its whole report
/// configuration in its custom ID.
pub struct CreateReportButton;

#[async_trait]
impl InteractionHandler for CreateReportButton {
    async fn handle(
        &self,
        platform: &dyn PlatformClient,
        event: &InteractionEvent,
        _vars: &RouteVars,
    ) -> Result<(), ModmailError> {
        let InteractionData::Command(command) = &event.data else {
            return Err(ModmailError::Internal(
                "create-report-button routed a non-command interaction".into(),
            ));
        };

        let message = match build_button(command) {
            Ok(button) => MessageDraft::default().with_button(button),
            Err(reason) => {
                debug!(reason = %reason, "rejected report button options");
                MessageDraft::ephemeral(reason)
            }
        };
        platform
            .respond(event, InteractionResponse::Message(message))
            .await
    }
}

fn build_button(command: &CommandData) -> Result<Button, String> {
    let label = command
        .string(names::LABEL)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .ok_or("A button label is required.")?;

    let color = match command.string(names::BUTTON_COLOR) {
        None => ButtonColor::default(),
        Some(raw) => ButtonColor::from_str(raw)
            .map_err(|_| format!("Unknown button color `{raw}`. Use red, green, blue or grey."))?,
    };

    let max_active = command.integer(names::MAX_ACTIVE).unwrap_or(0);
    if !(0..=MAX_ACTIVE_LIMIT).contains(&max_active) {
        return Err(format!(
            "Max active reports must be between 0 and {MAX_ACTIVE_LIMIT}."
        ));
    }

    let slow_mode = match command.string(names::SLOW_MODE) {
        None => Duration::ZERO,
        Some(raw) => parse_duration(raw).map_err(|e| {
            format!("Invalid slow mode: {e}. Use a duration such as `30s` or `1h5m10s`.")
        })?,
    };
    if slow_mode > MAX_SLOW_MODE {
        return Err("Slow mode cannot be longer than 6 hours.".into());
    }

    let config = ReportConfig {
        role: command.role(names::ROLE),
        channel: command.channel(names::CHANNEL),
        // Range checked above.
        max_active: max_active as u32,
        slow_mode: Duration::from_secs(slow_mode.as_secs()),
    };
    Ok(Button::Action {
        custom_id: custom_id::encode(ReportRoute::Button, &config),
        label: label.to_string(),
        style: color.style(),
    })
}
