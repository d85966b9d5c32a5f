// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slash command definitions and their one-time registration.

use serenity::all as discord;
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::http::Http;
use tracing::info;

use modmail_core::ModmailError;
use modmail_interactions::handlers::{ButtonColor, MAX_ACTIVE_LIMIT, names};

/// Where commands are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    Global,
    /// A single development guild; updates there apply immediately.
    Guild(u64),
}

impl CommandScope {
    pub fn describe(self) -> String {
        match self {
            CommandScope::Global => "global".into(),
            CommandScope::Guild(guild) => format!("guild {guild}"),
        }
    }
}

pub fn definitions() -> Vec<CreateCommand> {
    let colors = [
        ButtonColor::Red,
        ButtonColor::Green,
        ButtonColor::Blue,
        ButtonColor::Grey,
    ]
    .into_iter()
    .fold(
        CreateCommandOption::new(
            discord::CommandOptionType::String,
            names::BUTTON_COLOR,
            "The color of the button",
        ),
        |option, color| option.add_string_choice(color.to_string(), color.to_string()),
    );

    vec![
        CreateCommand::new(names::PING)
            .description("Ping...... pong!")
            .default_member_permissions(discord::Permissions::MANAGE_GUILD),
        CreateCommand::new(names::CREATE_REPORT_BUTTON)
            .description("Create a button that opens a report")
            .default_member_permissions(discord::Permissions::MANAGE_GUILD)
            .dm_permission(false)
            .add_option(
                CreateCommandOption::new(
                    discord::CommandOptionType::String,
                    names::LABEL,
                    "The label on the button to create",
                )
                .required(true),
            )
            .add_option(colors)
            .add_option(CreateCommandOption::new(
                discord::CommandOptionType::Role,
                names::ROLE,
                "The role that should be tagged when submitting a report",
            ))
            .add_option(
                CreateCommandOption::new(
                    discord::CommandOptionType::Channel,
                    names::CHANNEL,
                    "Channel that gets a short notice for every new report",
                )
                .channel_types(vec![discord::ChannelType::Text]),
            )
            .add_option(
                CreateCommandOption::new(
                    discord::CommandOptionType::Integer,
                    names::MAX_ACTIVE,
                    "How many open reports one member may have (0 for no limit)",
                )
                .min_int_value(0)
                .max_int_value(MAX_ACTIVE_LIMIT as u64),
            )
            .add_option(CreateCommandOption::new(
                discord::CommandOptionType::String,
                names::SLOW_MODE,
                "Slow mode for report threads, e.g. 1h5m10s (at most 6h)",
            )),
        CreateCommand::new(names::HELP)
            .description("Show help for setting up the bot")
            .default_member_permissions(discord::Permissions::MANAGE_GUILD)
            .dm_permission(true),
    ]
}

/// Overwrites the registered command set in `scope`.
pub async fn register(http: &Http, scope: CommandScope) -> Result<usize, ModmailError> {
    let commands = definitions();
    let registered = match scope {
        CommandScope::Global => discord::Command::set_global_commands(http, commands).await,
        CommandScope::Guild(guild) => {
            discord::GuildId::new(guild)
                .set_commands(http, commands)
                .await
        }
    }
    .map_err(|e| ModmailError::dependency("register commands", e))?;

    info!(count = registered.len(), scope = ?scope, "registered commands");
    Ok(registered.len())
}
