// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction core of the Modmail report bot.
//!
//! Routes decoded platform interactions to handlers, carries report settings
//! inside component custom IDs instead of a session store, enforces the
//! per-user open report ceiling against live platform state, and runs the
//! report submission workflow.
//!
//! Everything here talks to the platform through
//! [`modmail_core::PlatformClient`] and never touches the network directly.

pub mod custom_id;
pub mod dispatch;
pub mod duration;
pub mod handlers;
pub mod limiter;
pub mod routes;
pub mod workflow;

pub use custom_id::{ReportConfig, ReportRoute};
pub use dispatch::{DispatchOutcome, Dispatcher, SharedHandler, default_routes};
pub use duration::{MAX_SLOW_MODE, parse_duration};
pub use handlers::InteractionHandler;
pub use limiter::ActiveReportLimiter;
pub use routes::{RouteError, RouteMatch, RouteTable, RouteVars};
pub use workflow::{ReportOutcome, ReportRun, ReportState, ReportWorkflow, SideEffect};
