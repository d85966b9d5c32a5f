// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock platform client for deterministic testing.
//!
//! `MockPlatform` implements `PlatformClient` over an in-memory guild:
//! seeded active threads, captured outbound calls and injectable failures.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use modmail_core::{
    ActiveThread, ChannelId, GuildId, InteractionEvent, InteractionResponse, MessageDraft,
    MessageId, ModmailError, PlatformClient, PostedMessage, ThreadSpec, UserId,
};

const FIRST_THREAD_ID: u64 = 50_000;
const FIRST_MESSAGE_ID: u64 = 80_000;

/// Platform operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformOp {
    Respond,
    FollowUp,
    CreateThread,
    PostMessage,
    SetRateLimit,
    ListActiveThreads,
    ListThreadMembers,
}

impl PlatformOp {
    fn name(self) -> &'static str {
        match self {
            PlatformOp::Respond => "respond",
            PlatformOp::FollowUp => "follow up",
            PlatformOp::CreateThread => "create thread",
            PlatformOp::PostMessage => "post message",
            PlatformOp::SetRateLimit => "set rate limit",
            PlatformOp::ListActiveThreads => "list active threads",
            PlatformOp::ListThreadMembers => "list thread members",
        }
    }
}

/// A captured call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Respond(InteractionResponse),
    FollowUp(MessageDraft),
    CreateThread { parent: ChannelId, spec: ThreadSpec },
    PostMessage { channel: ChannelId, message: MessageDraft },
    SetRateLimit { thread: ChannelId, seconds: u16 },
    ListActiveThreads(GuildId),
    ListThreadMembers(ChannelId),
}

#[derive(Default)]
struct State {
    threads: Vec<(ActiveThread, Vec<UserId>)>,
    calls: Vec<PlatformCall>,
    failing: HashSet<PlatformOp>,
    failing_channels: HashSet<ChannelId>,
    next_thread: u64,
    next_message: u64,
}

/// A scripted chat platform for testing.
///
/// Cloning shares state, so a clone handed to code under test can be
/// inspected afterwards.
#[derive(Clone)]
pub struct MockPlatform {
    state: Arc<Mutex<State>>,
}

impl MockPlatform {
    /// Create a platform with no threads and no failures.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_thread: FIRST_THREAD_ID,
                next_message: FIRST_MESSAGE_ID,
                ..State::default()
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not hide the captured calls.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every subsequent call of `op` fail.
    pub fn fail(&self, op: PlatformOp) {
        self.state().failing.insert(op);
    }

    /// Make posts into `channel` fail while other posts succeed.
    pub fn fail_posts_to(&self, channel: ChannelId) {
        self.state().failing_channels.insert(channel);
    }

    /// Seed an active thread under `parent` with the given members.
    pub fn add_thread(&self, id: ChannelId, parent: ChannelId, members: &[UserId]) {
        self.state().threads.push((
            ActiveThread {
                id,
                parent_id: Some(parent),
            },
            members.to_vec(),
        ));
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state().calls.clone()
    }

    /// Number of thread member listings performed.
    pub fn member_queries(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, PlatformCall::ListThreadMembers(_)))
            .count()
    }

    /// Initial interaction responses, in order.
    pub fn responses(&self) -> Vec<InteractionResponse> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::Respond(response) => Some(response.clone()),
                _ => None,
            })
            .collect()
    }

    /// Follow-up messages, in order.
    pub fn follow_ups(&self) -> Vec<MessageDraft> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::FollowUp(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Channel posts, including failed attempts.
    pub fn posts(&self) -> Vec<(ChannelId, MessageDraft)> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::PostMessage { channel, message } => {
                    Some((*channel, message.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Thread creation requests, including failed attempts.
    pub fn created_threads(&self) -> Vec<(ChannelId, ThreadSpec)> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::CreateThread { parent, spec } => Some((*parent, spec.clone())),
                _ => None,
            })
            .collect()
    }

    /// Slow mode updates, including failed attempts.
    pub fn rate_limits(&self) -> Vec<(ChannelId, u16)> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                PlatformCall::SetRateLimit { thread, seconds } => Some((*thread, *seconds)),
                _ => None,
            })
            .collect()
    }

    /// Record `call` and fail it if `op` was made to fail.
    fn record(&self, op: PlatformOp, call: PlatformCall) -> Result<MutexGuard<'_, State>, ModmailError> {
        let mut state = self.state();
        state.calls.push(call);
        if state.failing.contains(&op) {
            return Err(injected(op));
        }
        Ok(state)
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn injected(op: PlatformOp) -> ModmailError {
    ModmailError::dependency(op.name(), std::io::Error::other("injected failure"))
}

fn posted(state: &mut State, channel: ChannelId) -> PostedMessage {
    let id = MessageId(state.next_message);
    state.next_message += 1;
    PostedMessage {
        id,
        channel_id: channel,
        jump_url: format!("https://discord.com/channels/@me/{channel}/{id}"),
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn respond(
        &self,
        _event: &InteractionEvent,
        response: InteractionResponse,
    ) -> Result<(), ModmailError> {
        drop(self.record(PlatformOp::Respond, PlatformCall::Respond(response))?);
        Ok(())
    }

    async fn follow_up(
        &self,
        event: &InteractionEvent,
        message: MessageDraft,
    ) -> Result<PostedMessage, ModmailError> {
        let mut state = self.record(PlatformOp::FollowUp, PlatformCall::FollowUp(message))?;
        Ok(posted(&mut state, event.channel_id))
    }

    async fn create_private_thread(
        &self,
        parent: ChannelId,
        spec: ThreadSpec,
    ) -> Result<ChannelId, ModmailError> {
        let mut state = self.record(
            PlatformOp::CreateThread,
            PlatformCall::CreateThread { parent, spec },
        )?;
        let id = ChannelId(state.next_thread);
        state.next_thread += 1;
        state.threads.push((
            ActiveThread {
                id,
                parent_id: Some(parent),
            },
            Vec::new(),
        ));
        Ok(id)
    }

    async fn post_message(
        &self,
        channel: ChannelId,
        message: MessageDraft,
    ) -> Result<PostedMessage, ModmailError> {
        let mut state = self.record(
            PlatformOp::PostMessage,
            PlatformCall::PostMessage { channel, message },
        )?;
        if state.failing_channels.contains(&channel) {
            return Err(injected(PlatformOp::PostMessage));
        }
        Ok(posted(&mut state, channel))
    }

    async fn set_rate_limit(&self, thread: ChannelId, seconds: u16) -> Result<(), ModmailError> {
        drop(self.record(
            PlatformOp::SetRateLimit,
            PlatformCall::SetRateLimit { thread, seconds },
        )?);
        Ok(())
    }

    async fn list_active_threads(&self, guild: GuildId) -> Result<Vec<ActiveThread>, ModmailError> {
        let state = self.record(
            PlatformOp::ListActiveThreads,
            PlatformCall::ListActiveThreads(guild),
        )?;
        Ok(state.threads.iter().map(|(thread, _)| *thread).collect())
    }

    async fn list_thread_members(&self, thread: ChannelId) -> Result<Vec<UserId>, ModmailError> {
        let state = self.record(
            PlatformOp::ListThreadMembers,
            PlatformCall::ListThreadMembers(thread),
        )?;
        state
            .threads
            .iter()
            .find(|(t, _)| t.id == thread)
            .map(|(_, members)| members.clone())
            .ok_or_else(|| {
                ModmailError::dependency(
                    PlatformOp::ListThreadMembers.name(),
                    std::io::Error::other(format!("unknown thread {thread}")),
                )
            })
    }
}
