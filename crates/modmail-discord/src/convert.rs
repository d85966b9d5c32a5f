// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation between serenity models and Modmail's platform-neutral types.

use serenity::all as discord;
use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, CreateModal, CreateThread,
};

use modmail_core::{
    Button, ButtonStyle, ChannelId, CommandData, CommandOption, ComponentData, Embed, GuildId,
    InteractionData, InteractionEvent, InteractionId, InteractionResponse, MessageDraft,
    ModalData, ModalForm, OptionValue, RoleId, TextInputStyle, ThreadSpec, UserId, UserProfile,
};

/// Buttons per action row allowed by Discord.
const BUTTONS_PER_ROW: usize = 5;

/// Decodes a serenity interaction. `None` for kinds the bot never handles
/// (ping, autocomplete).
pub fn interaction_event(interaction: &discord::Interaction) -> Option<InteractionEvent> {
    match interaction {
        discord::Interaction::Command(command) => Some(InteractionEvent {
            id: InteractionId(command.id.get()),
            token: command.token.clone(),
            user: user_profile(&command.user),
            guild_id: command.guild_id.map(|g| GuildId(g.get())),
            channel_id: ChannelId(command.channel_id.get()),
            data: InteractionData::Command(CommandData {
                name: command.data.name.clone(),
                options: command
                    .data
                    .options
                    .iter()
                    .filter_map(|option| {
                        option_value(&option.value).map(|value| CommandOption {
                            name: option.name.clone(),
                            value,
                        })
                    })
                    .collect(),
            }),
        }),
        discord::Interaction::Component(component) => Some(InteractionEvent {
            id: InteractionId(component.id.get()),
            token: component.token.clone(),
            user: user_profile(&component.user),
            guild_id: component.guild_id.map(|g| GuildId(g.get())),
            channel_id: ChannelId(component.channel_id.get()),
            data: InteractionData::Component(ComponentData {
                custom_id: component.data.custom_id.clone(),
            }),
        }),
        discord::Interaction::Modal(modal) => Some(InteractionEvent {
            id: InteractionId(modal.id.get()),
            token: modal.token.clone(),
            user: user_profile(&modal.user),
            guild_id: modal.guild_id.map(|g| GuildId(g.get())),
            channel_id: ChannelId(modal.channel_id.get()),
            data: InteractionData::Modal(ModalData {
                custom_id: modal.data.custom_id.clone(),
                fields: modal
                    .data
                    .components
                    .iter()
                    .flat_map(|row| &row.components)
                    .filter_map(|component| match component {
                        discord::ActionRowComponent::InputText(input) => Some((
                            input.custom_id.clone(),
                            input.value.clone().unwrap_or_default(),
                        )),
                        _ => None,
                    })
                    .collect(),
            }),
        }),
        _ => None,
    }
}

fn user_profile(user: &discord::User) -> UserProfile {
    UserProfile {
        id: UserId(user.id.get()),
        username: user.name.clone(),
        global_name: user.global_name.clone(),
        avatar_url: user.avatar_url(),
        default_avatar_url: user.default_avatar_url(),
    }
}

fn option_value(value: &discord::CommandDataOptionValue) -> Option<OptionValue> {
    use discord::CommandDataOptionValue as V;
    Some(match value {
        V::String(s) => OptionValue::String(s.clone()),
        V::Integer(i) => OptionValue::Integer(*i),
        V::Boolean(b) => OptionValue::Boolean(*b),
        V::Role(id) => OptionValue::Role(RoleId(id.get())),
        V::Channel(id) => OptionValue::Channel(ChannelId(id.get())),
        V::User(id) => OptionValue::User(UserId(id.get())),
        _ => return None,
    })
}

fn button_style(style: ButtonStyle) -> discord::ButtonStyle {
    match style {
        ButtonStyle::Primary => discord::ButtonStyle::Primary,
        ButtonStyle::Secondary => discord::ButtonStyle::Secondary,
        ButtonStyle::Success => discord::ButtonStyle::Success,
        ButtonStyle::Danger => discord::ButtonStyle::Danger,
    }
}

fn action_rows(buttons: &[Button]) -> Vec<CreateActionRow> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            CreateActionRow::Buttons(
                row.iter()
                    .map(|button| match button {
                        Button::Action {
                            custom_id,
                            label,
                            style,
                        } => CreateButton::new(custom_id)
                            .label(label)
                            .style(button_style(*style)),
                        Button::Link { url, label } => CreateButton::new_link(url).label(label),
                    })
                    .collect(),
            )
        })
        .collect()
}

fn embed(embed: &Embed) -> CreateEmbed {
    let mut built = CreateEmbed::new();
    if let Some(title) = &embed.title {
        built = built.title(title);
    }
    if let Some(description) = &embed.description {
        built = built.description(description);
    }
    if let Some(color) = embed.color {
        built = built.colour(color);
    }
    if let Some(author) = &embed.author {
        let mut line = CreateEmbedAuthor::new(&author.name);
        if let Some(icon) = &author.icon_url {
            line = line.icon_url(icon);
        }
        built = built.author(line);
    }
    built
}

fn embeds(message: &MessageDraft) -> Vec<CreateEmbed> {
    message.embeds.iter().map(embed).collect()
}

fn response_message(message: &MessageDraft) -> CreateInteractionResponseMessage {
    let mut built = CreateInteractionResponseMessage::new()
        .ephemeral(message.ephemeral)
        .embeds(embeds(message))
        .components(action_rows(&message.buttons));
    if !message.content.is_empty() {
        built = built.content(&message.content);
    }
    built
}

fn modal(form: &ModalForm) -> CreateModal {
    let rows = form
        .inputs
        .iter()
        .map(|input| {
            let style = match input.style {
                TextInputStyle::Short => discord::InputTextStyle::Short,
                TextInputStyle::Paragraph => discord::InputTextStyle::Paragraph,
            };
            let mut text = CreateInputText::new(style, &input.label, &input.custom_id)
                .required(input.required);
            if let Some(placeholder) = &input.placeholder {
                text = text.placeholder(placeholder);
            }
            if let Some(min) = input.min_length {
                text = text.min_length(min);
            }
            if let Some(max) = input.max_length {
                text = text.max_length(max);
            }
            CreateActionRow::InputText(text)
        })
        .collect();
    CreateModal::new(&form.custom_id, &form.title).components(rows)
}

pub fn interaction_response(response: &InteractionResponse) -> CreateInteractionResponse {
    match response {
        InteractionResponse::Message(message) => {
            CreateInteractionResponse::Message(response_message(message))
        }
        InteractionResponse::Modal(form) => CreateInteractionResponse::Modal(modal(form)),
        InteractionResponse::Defer { ephemeral } => CreateInteractionResponse::Defer(
            CreateInteractionResponseMessage::new().ephemeral(*ephemeral),
        ),
    }
}

pub fn follow_up(message: &MessageDraft) -> CreateInteractionResponseFollowup {
    let mut built = CreateInteractionResponseFollowup::new()
        .ephemeral(message.ephemeral)
        .embeds(embeds(message))
        .components(action_rows(&message.buttons));
    if !message.content.is_empty() {
        built = built.content(&message.content);
    }
    built
}

pub fn channel_message(message: &MessageDraft) -> CreateMessage {
    let mut built = CreateMessage::new()
        .embeds(embeds(message))
        .components(action_rows(&message.buttons));
    if !message.content.is_empty() {
        built = built.content(&message.content);
    }
    built
}

pub fn private_thread(spec: &ThreadSpec) -> CreateThread<'_> {
    CreateThread::new(&spec.name)
        .kind(discord::ChannelType::PrivateThread)
        .auto_archive_duration(archive_duration(spec.auto_archive_minutes))
        .invitable(spec.invitable)
}

/// Rounds up to the next duration Discord offers.
fn archive_duration(minutes: u16) -> discord::AutoArchiveDuration {
    match minutes {
        0..=60 => discord::AutoArchiveDuration::OneHour,
        61..=1_440 => discord::AutoArchiveDuration::OneDay,
        1_441..=4_320 => discord::AutoArchiveDuration::ThreeDays,
        _ => discord::AutoArchiveDuration::OneWeek,
    }
}
