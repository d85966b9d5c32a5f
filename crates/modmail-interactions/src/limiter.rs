// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Active-report admission control.
//!
//! Counts how many open threads under a parent channel already contain the
//! submitter, using live platform state. Nothing is cached: every check
//! lists active threads and then thread members, one thread at a time,
//! stopping as soon as the ceiling is proven reached.
//!
//! Check-then-create is not atomic against the platform. Two submissions
//! racing near the ceiling can both be admitted.

use modmail_core::{ChannelId, GuildId, ModmailError, PlatformClient, UserId};
use tracing::debug;

/// Decides whether a user may open another report.
pub struct ActiveReportLimiter<'a> {
    platform: &'a dyn PlatformClient,
}

impl<'a> ActiveReportLimiter<'a> {
    pub fn new(platform: &'a dyn PlatformClient) -> Self {
        Self { platform }
    }

    /// Returns `Ok(false)` once `user` is a member of `ceiling` active
    /// threads under `parent`. A ceiling of zero means unlimited and never
    /// touches the platform.
    ///
    /// Any failed query is returned as an error; the caller must not read
    /// it as either admitted or denied.
    pub async fn is_admissible(
        &self,
        user: UserId,
        guild: Option<GuildId>,
        parent: ChannelId,
        ceiling: u32,
    ) -> Result<bool, ModmailError> {
        if ceiling == 0 {
            return Ok(true);
        }
        let guild = guild.ok_or_else(|| {
            ModmailError::Internal("active report limit can only be checked in a guild".into())
        })?;

        let threads = self.platform.list_active_threads(guild).await?;
        let mut held = 0u32;
        let mut examined = 0usize;
        for thread in threads.iter().filter(|t| t.parent_id == Some(parent)) {
            examined += 1;
            let members = self.platform.list_thread_members(thread.id).await?;
            if members.contains(&user) {
                held += 1;
                if held >= ceiling {
                    debug!(
                        user_id = %user,
                        parent_id = %parent,
                        ceiling,
                        examined,
                        "active report ceiling reached"
                    );
                    return Ok(false);
                }
            }
        }

        debug!(
            user_id = %user,
            parent_id = %parent,
            held,
            ceiling,
            examined,
            "active report check passed"
        );
        Ok(true)
    }
}
