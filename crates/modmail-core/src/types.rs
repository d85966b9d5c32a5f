// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-neutral identifiers and the decoded interaction event.
//!
//! The transport decodes each inbound request into an [`InteractionEvent`].
//! The event is consumed by exactly one handler and never retained.

use strum::{Display, EnumString};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw snowflake value.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake!(
    /// Identifier of a single inbound interaction.
    InteractionId
);
snowflake!(
    /// Identifier of a platform user.
    UserId
);
snowflake!(
    /// Identifier of a guild (server).
    GuildId
);
snowflake!(
    /// Identifier of a channel or thread.
    ChannelId
);
snowflake!(
    /// Identifier of a guild role.
    RoleId
);
snowflake!(
    /// Identifier of a posted message.
    MessageId
);

impl UserId {
    /// Mention markup that pings this user.
    pub fn mention(self) -> String {
        format!("<@{}>", self.0)
    }
}

impl RoleId {
    /// Mention markup that pings every member holding this role.
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

/// The three interaction categories the bot routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum InteractionCategory {
    /// Slash command invocation.
    Command,
    /// Message component activation (button press).
    Component,
    /// Modal (form) submission.
    Modal,
}

/// The acting user as seen by the platform at interaction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar_url: Option<String>,
    pub default_avatar_url: String,
}

impl UserProfile {
    /// Name shown to other members: the global display name, else the username.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    /// Custom avatar if the user set one, else the platform default avatar.
    pub fn avatar(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or(&self.default_avatar_url)
    }
}

/// A decoded inbound interaction.
#[derive(Debug, Clone)]
pub struct InteractionEvent {
    pub id: InteractionId,
    /// Continuation token used to answer this interaction.
    pub token: String,
    pub user: UserProfile,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub data: InteractionData,
}

impl InteractionEvent {
    /// Category used to pick the route table.
    pub fn category(&self) -> InteractionCategory {
        match self.data {
            InteractionData::Command(_) => InteractionCategory::Command,
            InteractionData::Component(_) => InteractionCategory::Component,
            InteractionData::Modal(_) => InteractionCategory::Modal,
        }
    }

    /// Path-like identifier matched against route patterns.
    ///
    /// Commands are addressed as `/<name>`; components and modals carry their
    /// custom ID verbatim.
    pub fn identifier(&self) -> String {
        match &self.data {
            InteractionData::Command(cmd) => format!("/{}", cmd.name),
            InteractionData::Component(component) => component.custom_id.clone(),
            InteractionData::Modal(modal) => modal.custom_id.clone(),
        }
    }

    /// Whether the interaction happened inside a guild rather than a DM.
    pub fn in_guild(&self) -> bool {
        self.guild_id.is_some()
    }
}

/// Category-specific payload of an interaction.
#[derive(Debug, Clone)]
pub enum InteractionData {
    Command(CommandData),
    Component(ComponentData),
    Modal(ModalData),
}

/// A slash command invocation with its resolved options.
#[derive(Debug, Clone, Default)]
pub struct CommandData {
    pub name: String,
    pub options: Vec<CommandOption>,
}

/// One named option passed to a slash command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

/// Typed value of a command option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Role(RoleId),
    Channel(ChannelId),
    User(UserId),
}

impl CommandData {
    fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options
            .iter()
            .find(|opt| opt.name == name)
            .map(|opt| &opt.value)
    }

    /// String option by name.
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.option(name) {
            Some(OptionValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer option by name.
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.option(name) {
            Some(OptionValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Role option by name.
    pub fn role(&self, name: &str) -> Option<RoleId> {
        match self.option(name) {
            Some(OptionValue::Role(id)) => Some(*id),
            _ => None,
        }
    }

    /// Channel option by name.
    pub fn channel(&self, name: &str) -> Option<ChannelId> {
        match self.option(name) {
            Some(OptionValue::Channel(id)) => Some(*id),
            _ => None,
        }
    }
}

/// A component activation.
#[derive(Debug, Clone)]
pub struct ComponentData {
    pub custom_id: String,
}

/// A modal submission with its text inputs keyed by input custom ID.
#[derive(Debug, Clone)]
pub struct ModalData {
    pub custom_id: String,
    pub fields: Vec<(String, String)>,
}

impl ModalData {
    /// Submitted text of the input with the given custom ID.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// An open thread as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveThread {
    pub id: ChannelId,
    pub parent_id: Option<ChannelId>,
}

/// A message the platform accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    /// Permanent link that jumps to the message.
    pub jump_url: String,
}
