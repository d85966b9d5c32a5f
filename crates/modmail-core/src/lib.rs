// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Modmail report bot.
//!
//! This crate provides the error taxonomy, platform-neutral identifiers and
//! interaction events, message drafts, and the [`PlatformClient`] trait that
//! platform adapters implement.

pub mod error;
pub mod message;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{FormatError, ModmailError};
pub use message::{
    Button, ButtonStyle, Embed, EmbedAuthor, InteractionResponse, MessageDraft, ModalForm,
    TextInput, TextInputStyle, ThreadSpec,
};
pub use traits::PlatformClient;
pub use types::{
    ActiveThread, ChannelId, CommandData, CommandOption, ComponentData, GuildId,
    InteractionCategory, InteractionData, InteractionEvent, InteractionId, MessageId, ModalData,
    OptionValue, PostedMessage, RoleId, UserId, UserProfile,
};
