// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interaction builders.
//!
//! Every event is issued by [`SUBMITTER`] in [`GUILD`], inside [`CHANNEL`],
//! unless the caller overrides the fields afterwards.

use modmail_core::{
    ChannelId, CommandData, CommandOption, ComponentData, GuildId, InteractionData,
    InteractionEvent, InteractionId, ModalData, OptionValue, UserId, UserProfile,
};

pub const GUILD: GuildId = GuildId(1);
pub const CHANNEL: ChannelId = ChannelId(100);
pub const SUBMITTER: UserId = UserId(42);

pub fn submitter() -> UserProfile {
    UserProfile {
        id: SUBMITTER,
        username: "alice".into(),
        global_name: None,
        avatar_url: None,
        default_avatar_url: "https://cdn.discordapp.com/embed/avatars/2.png".into(),
    }
}

fn event(data: InteractionData) -> InteractionEvent {
    InteractionEvent {
        id: InteractionId(9_000),
        token: "interaction-token".into(),
        user: submitter(),
        guild_id: Some(GUILD),
        channel_id: CHANNEL,
        data,
    }
}

/// A slash command invocation.
pub fn command(name: &str, options: Vec<(&str, OptionValue)>) -> InteractionEvent {
    event(InteractionData::Command(CommandData {
        name: name.to_string(),
        options: options
            .into_iter()
            .map(|(name, value)| CommandOption {
                name: name.to_string(),
                value,
            })
            .collect(),
    }))
}

/// A button press.
pub fn component(custom_id: &str) -> InteractionEvent {
    event(InteractionData::Component(ComponentData {
        custom_id: custom_id.to_string(),
    }))
}

/// A modal submission with the given text inputs.
pub fn modal(custom_id: &str, fields: &[(&str, &str)]) -> InteractionEvent {
    event(InteractionData::Modal(ModalData {
        custom_id: custom_id.to_string(),
        fields: fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    }))
}

/// A report form filled in with a valid title and description.
pub fn report_submission(custom_id: &str) -> InteractionEvent {
    modal(
        custom_id,
        &[
            ("title", "Spam in #general"),
            (
                "description",
                "Someone has been posting invite links every few minutes.",
            ),
        ],
    )
}
