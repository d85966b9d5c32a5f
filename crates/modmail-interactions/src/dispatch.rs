// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch front: one inbound event, one route lookup, one handler.

use std::sync::Arc;

use modmail_core::{InteractionCategory, InteractionEvent, ModmailError, PlatformClient};
use tracing::{Instrument, debug, info, info_span};

use crate::custom_id::ReportRoute;
use crate::handlers::{
    CreateReportButton, Help, InteractionHandler, Ping, ReportButton, ReportModal, names,
};
use crate::routes::{RouteError, RouteTable};

/// Handler stored in the route table.
pub type SharedHandler = Arc<dyn InteractionHandler>;

/// What happened to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran to completion for the given pattern.
    Handled { pattern: String },
    /// No route matched; the event was dropped without a reply.
    Ignored,
}

/// Routes decoded events to their handlers.
///
/// Holds no per-request state, so one dispatcher is shared by every
/// concurrent interaction.
pub struct Dispatcher {
    routes: RouteTable<SharedHandler>,
    platform: Arc<dyn PlatformClient>,
}

impl Dispatcher {
    /// Dispatcher with the bot's built-in routes.
    pub fn new(platform: Arc<dyn PlatformClient>) -> Result<Self, RouteError> {
        Ok(Self::with_routes(platform, default_routes()?))
    }

    pub fn with_routes(
        platform: Arc<dyn PlatformClient>,
        routes: RouteTable<SharedHandler>,
    ) -> Self {
        Self { routes, platform }
    }

    pub fn platform(&self) -> &Arc<dyn PlatformClient> {
        &self.platform
    }

    /// Routes `event` and awaits its handler.
    ///
    /// Handler errors are returned to the transport; an unmatched event is
    /// [`DispatchOutcome::Ignored`], not an error.
    pub async fn dispatch(&self, event: &InteractionEvent) -> Result<DispatchOutcome, ModmailError> {
        let category = event.category();
        let identifier = event.identifier();
        info!(
            interaction_id = %event.id,
            interaction_type = %category,
            identifier = %identifier,
            user_id = %event.user.id,
            "interaction received"
        );

        let Some(matched) = self.routes.lookup(category, &identifier) else {
            debug!(interaction_type = %category, identifier = %identifier, "no route, ignoring");
            return Ok(DispatchOutcome::Ignored);
        };

        let span = info_span!(
            "interaction",
            interaction_id = %event.id,
            pattern = matched.pattern
        );
        matched
            .handler
            .handle(self.platform.as_ref(), event, &matched.vars)
            .instrument(span)
            .await?;

        Ok(DispatchOutcome::Handled {
            pattern: matched.pattern.to_string(),
        })
    }
}

/// The bot's built-in routes.
///
/// Report buttons and forms are registered at every field arity so
/// identifiers minted by earlier versions keep routing.
pub fn default_routes() -> Result<RouteTable<SharedHandler>, RouteError> {
    let mut routes: RouteTable<SharedHandler> = RouteTable::new();
    routes
        .register(
            InteractionCategory::Command,
            &format!("/{}", names::PING),
            Arc::new(Ping),
        )?
        .register(
            InteractionCategory::Command,
            &format!("/{}", names::CREATE_REPORT_BUTTON),
            Arc::new(CreateReportButton),
        )?
        .register(
            InteractionCategory::Command,
            &format!("/{}", names::HELP),
            Arc::new(Help),
        )?;

    let button: SharedHandler = Arc::new(ReportButton);
    for pattern in ReportRoute::Button.patterns() {
        routes.register(InteractionCategory::Component, &pattern, Arc::clone(&button))?;
    }
    let modal: SharedHandler = Arc::new(ReportModal);
    for pattern in ReportRoute::Modal.patterns() {
        routes.register(InteractionCategory::Modal, &pattern, Arc::clone(&modal))?;
    }
    Ok(routes)
}
