// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-submission report FSM.
//!
//! Each modal submission walks:
//! Received -> Validated -> Admitted -> ThreadCreated -> Announced
//! -> Mirrored (optional) -> Acknowledged, or leaves early through
//! RejectedValidation, RejectedAdmission or Failed.
//!
//! Two kinds of step exist. Fatal steps (admission check, thread creation,
//! announcement) end the run with a message to the submitter. Best-effort
//! steps (slow mode, mirror notice) report a [`SideEffect`] and never stop
//! the run. Nothing is rolled back: a thread created before a later failure
//! stays in place.

use std::time::Duration;

use modmail_core::{
    Button, ChannelId, Embed, EmbedAuthor, InteractionData, InteractionEvent, MessageDraft,
    ModmailError, PlatformClient, PostedMessage, RoleId, ThreadSpec, UserProfile,
};
use tracing::{info, warn};

use crate::custom_id::{self, ReportConfig};
use crate::duration::MAX_SLOW_MODE;
use crate::limiter::ActiveReportLimiter;

/// Inactivity before a report thread is archived: one week.
pub const AUTO_ARCHIVE_MINUTES: u16 = 10_080;

/// Accent colour of the announcement embed.
pub const REPORT_COLOR: u32 = 0x4848FF;

/// Modal input carrying the report subject.
pub const TITLE_INPUT: &str = "title";

/// Modal input carrying the report body.
pub const DESCRIPTION_INPUT: &str = "description";

/// States of the report FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportState {
    Received,
    Validated,
    Admitted,
    ThreadCreated,
    Announced,
    Mirrored,
    Acknowledged,
    RejectedValidation,
    RejectedAdmission,
    Failed,
}

impl std::fmt::Display for ReportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReportState::Received => "received",
            ReportState::Validated => "validated",
            ReportState::Admitted => "admitted",
            ReportState::ThreadCreated => "thread_created",
            ReportState::Announced => "announced",
            ReportState::Mirrored => "mirrored",
            ReportState::Acknowledged => "acknowledged",
            ReportState::RejectedValidation => "rejected_validation",
            ReportState::RejectedAdmission => "rejected_admission",
            ReportState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a best-effort step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    /// Not configured for this report.
    Skipped,
    Applied,
    /// Attempted and failed; logged and otherwise ignored.
    Degraded(String),
}

/// A validated modal submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSubmission {
    pub title: String,
    pub description: String,
    pub config: ReportConfig,
}

/// What the submitter ended up with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Created {
        thread: ChannelId,
        announcement: PostedMessage,
        slow_mode: SideEffect,
        mirror: SideEffect,
    },
    RejectedValidation { reason: String },
    RejectedAdmission { ceiling: u32 },
    Failed { reason: String },
}

/// A finished run: the outcome plus every state visited, in order.
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub outcome: ReportOutcome,
    pub transitions: Vec<ReportState>,
}

impl ReportRun {
    /// The terminal state of the run.
    pub fn final_state(&self) -> Option<ReportState> {
        self.transitions.last().copied()
    }
}

/// One report submission being processed.
pub struct ReportWorkflow<'a> {
    platform: &'a dyn PlatformClient,
    event: &'a InteractionEvent,
    transitions: Vec<ReportState>,
}

impl<'a> ReportWorkflow<'a> {
    pub fn new(platform: &'a dyn PlatformClient, event: &'a InteractionEvent) -> Self {
        Self {
            platform,
            event,
            transitions: vec![ReportState::Received],
        }
    }

    /// Runs the FSM to a terminal state.
    ///
    /// The initial response must already be deferred: all feedback is sent
    /// as ephemeral follow-ups. Only a failure to deliver that feedback is
    /// returned as `Err`.
    pub async fn run(mut self) -> Result<ReportRun, ModmailError> {
        let submission = match self.validate() {
            Ok(submission) => submission,
            Err(reason) => {
                self.enter(ReportState::RejectedValidation);
                self.tell(&reason).await?;
                return Ok(self.finish(ReportOutcome::RejectedValidation { reason }));
            }
        };
        self.enter(ReportState::Validated);

        let ceiling = submission.config.max_active;
        let limiter = ActiveReportLimiter::new(self.platform);
        match limiter
            .is_admissible(
                self.event.user.id,
                self.event.guild_id,
                self.event.channel_id,
                ceiling,
            )
            .await
        {
            Ok(true) => self.enter(ReportState::Admitted),
            Ok(false) => {
                self.enter(ReportState::RejectedAdmission);
                self.tell(&limit_reached_message(ceiling)).await?;
                return Ok(self.finish(ReportOutcome::RejectedAdmission { ceiling }));
            }
            Err(e) => {
                warn!(error = %e, "active report check failed");
                return self
                    .fail("Could not verify how many reports you have open. Please try again later.")
                    .await;
            }
        }

        let spec = ThreadSpec {
            name: submission.title.clone(),
            auto_archive_minutes: AUTO_ARCHIVE_MINUTES,
            invitable: false,
        };
        let thread = match self
            .platform
            .create_private_thread(self.event.channel_id, spec)
            .await
        {
            Ok(thread) => thread,
            Err(e) => {
                warn!(error = %e, "failed to create report thread");
                return self
                    .fail("Could not create your report. Please try again later.")
                    .await;
            }
        };
        self.enter(ReportState::ThreadCreated);
        info!(thread_id = %thread, user_id = %self.event.user.id, "report thread created");

        let slow_mode = self.apply_slow_mode(thread, submission.config.slow_mode).await;

        let message = announcement(&self.event.user, submission.config.role, &submission);
        let announcement = match self.platform.post_message(thread, message).await {
            Ok(posted) => posted,
            Err(e) => {
                warn!(error = %e, thread_id = %thread, "failed to post report message");
                return self
                    .fail("Your report thread was created, but posting the report failed.")
                    .await;
            }
        };
        self.enter(ReportState::Announced);

        let mirror = self.mirror(&submission, &announcement).await;
        if mirror == SideEffect::Applied {
            self.enter(ReportState::Mirrored);
        }

        self.platform
            .follow_up(self.event, confirmation(&announcement.jump_url))
            .await?;
        self.enter(ReportState::Acknowledged);

        Ok(self.finish(ReportOutcome::Created {
            thread,
            announcement,
            slow_mode,
            mirror,
        }))
    }

    fn validate(&self) -> Result<ReportSubmission, String> {
        let InteractionData::Modal(modal) = &self.event.data else {
            return Err("Reports can only be submitted through the report form.".into());
        };

        let (_, config) = custom_id::decode(&modal.custom_id).map_err(|e| {
            warn!(error = %e, custom_id = %modal.custom_id, "malformed report identifier");
            "This report form is outdated or malformed. Please ask a moderator for a new report button."
                .to_string()
        })?;

        if config.slow_mode > MAX_SLOW_MODE {
            return Err("Slow mode cannot be longer than 6 hours.".into());
        }

        let field = |name: &str| {
            modal
                .text(name)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .ok_or_else(|| format!("The `{name}` field is required."))
        };

        Ok(ReportSubmission {
            title: field(TITLE_INPUT)?,
            description: field(DESCRIPTION_INPUT)?,
            config,
        })
    }

    async fn apply_slow_mode(&self, thread: ChannelId, slow_mode: Duration) -> SideEffect {
        if slow_mode.is_zero() {
            return SideEffect::Skipped;
        }
        // Bounded by MAX_SLOW_MODE during validation.
        let seconds = u16::try_from(slow_mode.as_secs()).unwrap_or(u16::MAX);
        match self.platform.set_rate_limit(thread, seconds).await {
            Ok(()) => SideEffect::Applied,
            Err(e) => {
                warn!(error = %e, thread_id = %thread, seconds, "failed to set slow mode");
                SideEffect::Degraded(e.to_string())
            }
        }
    }

    async fn mirror(&self, submission: &ReportSubmission, announcement: &PostedMessage) -> SideEffect {
        let Some(channel) = submission.config.channel else {
            return SideEffect::Skipped;
        };
        let notice = mirror_notice(&self.event.user, &submission.title, &announcement.jump_url);
        match self.platform.post_message(channel, notice).await {
            Ok(_) => SideEffect::Applied,
            Err(e) => {
                warn!(error = %e, channel_id = %channel, "failed to post mirror notice");
                SideEffect::Degraded(e.to_string())
            }
        }
    }

    async fn fail(mut self, reason: &str) -> Result<ReportRun, ModmailError> {
        self.enter(ReportState::Failed);
        self.tell(reason).await?;
        Ok(self.finish(ReportOutcome::Failed {
            reason: reason.to_string(),
        }))
    }

    async fn tell(&self, text: &str) -> Result<(), ModmailError> {
        self.platform
            .follow_up(self.event, MessageDraft::ephemeral(text))
            .await
            .map(|_| ())
    }

    fn enter(&mut self, state: ReportState) {
        self.transitions.push(state);
    }

    fn finish(self, outcome: ReportOutcome) -> ReportRun {
        info!(
            interaction_id = %self.event.id,
            state = %self.transitions.last().copied().unwrap_or(ReportState::Received),
            "report workflow finished"
        );
        ReportRun {
            outcome,
            transitions: self.transitions,
        }
    }
}

/// Message posted into a new report thread.
pub fn announcement(
    user: &UserProfile,
    role: Option<RoleId>,
    submission: &ReportSubmission,
) -> MessageDraft {
    let content = match role {
        Some(role) => format!("{} {}", role.mention(), user.id.mention()),
        None => user.id.mention(),
    };
    MessageDraft::text(content).with_embed(Embed {
        title: Some(submission.title.clone()),
        description: Some(submission.description.clone()),
        color: Some(REPORT_COLOR),
        author: Some(EmbedAuthor {
            name: user.display_name().to_string(),
            icon_url: Some(user.avatar().to_string()),
        }),
    })
}

/// Short notice posted to the staff mirror channel.
pub fn mirror_notice(user: &UserProfile, title: &str, link: &str) -> MessageDraft {
    MessageDraft::text(format!("New report from {}: **{title}**", user.id.mention())).with_button(
        Button::Link {
            url: link.to_string(),
            label: "View".into(),
        },
    )
}

/// Final ephemeral confirmation to the submitter.
pub fn confirmation(link: &str) -> MessageDraft {
    MessageDraft::ephemeral("Report created!").with_button(Button::Link {
        url: link.to_string(),
        label: "View".into(),
    })
}

fn limit_reached_message(ceiling: u32) -> String {
    let noun = if ceiling == 1 { "report" } else { "reports" };
    format!(
        "You already have {ceiling} open {noun}, which is the limit. \
         Please wait until one is closed before opening another."
    )
}
