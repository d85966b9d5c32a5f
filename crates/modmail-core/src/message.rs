// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-neutral drafts for everything the bot sends.
//!
//! Handlers compose these values; the platform adapter translates them into
//! its own builders. Nothing here performs I/O.

/// Visual style of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
}

/// A clickable button attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    /// Delivers a component interaction carrying `custom_id` when pressed.
    Action {
        custom_id: String,
        label: String,
        style: ButtonStyle,
    },
    /// Opens `url` in the client.
    Link { url: String, label: String },
}

/// Author line of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

/// A rich panel rendered below the message content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub author: Option<EmbedAuthor>,
}

/// A message to post, reply with, or follow up with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageDraft {
    pub content: String,
    pub embeds: Vec<Embed>,
    pub buttons: Vec<Button>,
    /// Visible only to the invoking user. Ignored for channel posts.
    pub ephemeral: bool,
}

impl MessageDraft {
    /// Plain text message.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Plain text message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            ..Self::default()
        }
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }
}

/// Rendering of a modal text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputStyle {
    Short,
    Paragraph,
}

/// One text input of a modal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub custom_id: String,
    pub label: String,
    pub style: TextInputStyle,
    pub placeholder: Option<String>,
    pub min_length: Option<u16>,
    pub max_length: Option<u16>,
    pub required: bool,
}

/// A modal form shown in response to a component interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalForm {
    pub custom_id: String,
    pub title: String,
    pub inputs: Vec<TextInput>,
}

/// The initial response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionResponse {
    /// Reply with a message right away.
    Message(MessageDraft),
    /// Open a modal form.
    Modal(ModalForm),
    /// Acknowledge now and send follow-ups later; `ephemeral` applies to them.
    Defer { ephemeral: bool },
}

/// Parameters of a new private thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSpec {
    pub name: String,
    /// Minutes of inactivity before the thread is archived.
    pub auto_archive_minutes: u16,
    /// Whether non-moderators may add other members.
    pub invitable: bool,
}
