// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handlers bound to routes by the dispatcher.

mod create_button;
mod help;
mod ping;
mod report_button;
mod report_modal;

use async_trait::async_trait;
use modmail_core::{InteractionEvent, ModmailError, PlatformClient};

use crate::routes::RouteVars;

pub use create_button::{ButtonColor, CreateReportButton};
pub use help::{HELP_COLOR, HELP_TEXT, Help};
pub use ping::Ping;
pub use report_button::{ReportButton, report_form};
pub use report_modal::ReportModal;

/// Command and option names shared with command registration.
pub mod names {
    pub const PING: &str = "ping";
    pub const CREATE_REPORT_BUTTON: &str = "create-report-button";
    pub const HELP: &str = "help";

    pub const LABEL: &str = "label";
    pub const BUTTON_COLOR: &str = "button-color";
    pub const ROLE: &str = "role";
    pub const CHANNEL: &str = "channel";
    pub const MAX_ACTIVE: &str = "max-active";
    pub const SLOW_MODE: &str = "slow-mode";
}

/// Highest `max-active` a report button may be created with.
pub const MAX_ACTIVE_LIMIT: i64 = 100;

/// Handles one routed interaction.
///
/// Returning `Ok` means the interaction was answered or deliberately left
/// unanswered. Errors are logged by the dispatcher; nothing retries them.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    async fn handle(
        &self,
        platform: &dyn PlatformClient,
        event: &InteractionEvent,
        vars: &RouteVars,
    ) -> Result<(), ModmailError>;
}
