//! Discord adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{
    ActivityData, ChannelId, Client, Context, CreateAllowedMentions, CreateEmbed, CreateEmbedFooter, CreateMessage,
    EditRole, EventHandler, GatewayIntents, GuildId, Http, Message, MessageId, ReactionType,
    Ready, RoleId, UserId,
};
use serenity::http::HttpError;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Embed, InboundMessage, NewRole, Reply, Role, User};
use crate::domain::traits::{Bot, BotInfo, RoleRegistry};
use crate::infrastructure::config::Config;

/// Map a serenity failure onto the bot's error taxonomy
fn platform_error(e: serenity::Error) -> BotError {
    match &e {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 403 =>
        {
            BotError::PermissionDenied(e.to_string())
        }
        serenity::Error::Http(_) => BotError::Network(e.to_string()),
        _ => BotError::Platform(e.to_string()),
    }
}

/// Parse a snowflake; zero is rejected since serenity ids must be non-zero
fn snowflake(id: &str) -> Result<u64, BotError> {
    id.parse::<u64>()
        .ok()
        .filter(|n| *n != 0)
        .ok_or_else(|| BotError::NotFound(format!("invalid id: {}", id)))
}

fn to_role(role: &serenity::all::Role) -> Role {
    let mut out = Role::new(role.id.to_string(), role.name.clone()).with_position(role.position);
    if role.colour.0 != 0 {
        out = out.with_colour(role.colour.0);
    }
    out.mentionable = role.mentionable;
    out
}

fn to_embed(embed: Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new().title(embed.title);
    if let Some(description) = embed.description {
        out = out.description(description);
    }
    if let Some(colour) = embed.colour {
        out = out.colour(colour);
    }
    for field in embed.fields {
        out = out.field(field.name, field.value, false);
    }
    if let Some(footer) = embed.footer {
        out = out.footer(CreateEmbedFooter::new(footer));
    }
    out
}

/// Text message that pings nobody; user-supplied text is echoed verbatim
fn text_message(text: &str) -> CreateMessage {
    CreateMessage::new()
        .content(text)
        .allowed_mentions(CreateAllowedMentions::new())
}

/// Reply that pings only the author of the referenced message
fn reply_message(text: &str, channel: ChannelId, original: MessageId) -> CreateMessage {
    CreateMessage::new()
        .content(text)
        .reference_message((channel, original))
        .allowed_mentions(CreateAllowedMentions::new().replied_user(true))
}

/// Convert a gateway message into the platform-neutral form
pub fn to_inbound(msg: &Message) -> InboundMessage {
    let mut author = User::new(msg.author.id.to_string()).with_username(msg.author.name.clone());
    author.is_bot = msg.author.bot;

    let received_at = DateTime::<Utc>::from_timestamp(msg.timestamp.unix_timestamp(), 0)
        .unwrap_or_else(Utc::now);

    let inbound = match msg.guild_id {
        Some(_) => InboundMessage::guild(msg.id.to_string(), msg.channel_id.to_string(), author, msg.content.clone()),
        None => InboundMessage::direct(msg.id.to_string(), msg.channel_id.to_string(), author, msg.content.clone()),
    };
    inbound.with_received_at(received_at)
}

/// Messaging side of Discord
pub struct DiscordAdapter {
    http: Arc<Http>,
    info: BotInfo,
}

impl DiscordAdapter {
    pub fn new(http: Arc<Http>, info: BotInfo) -> Self {
        Self { http, info }
    }
}

#[async_trait]
impl Bot for DiscordAdapter {
    async fn send_message(&self, channel_id: &str, reply: Reply) -> Result<String, BotError> {
        let channel = ChannelId::new(snowflake(channel_id)?);
        let builder = match reply {
            Reply::Text(text) => text_message(&text),
            Reply::Embed(embed) => CreateMessage::new().embed(to_embed(embed)),
        };
        let sent = channel.send_message(&self.http, builder).await.map_err(platform_error)?;
        Ok(sent.id.to_string())
    }

    async fn reply(&self, message: &InboundMessage, text: &str) -> Result<String, BotError> {
        let channel = ChannelId::new(snowflake(&message.channel_id)?);
        let original = MessageId::new(snowflake(&message.id)?);
        let builder = reply_message(text, channel, original);
        let sent = channel.send_message(&self.http, builder).await.map_err(platform_error)?;
        Ok(sent.id.to_string())
    }

    async fn direct_message(&self, user_id: &str, text: &str) -> Result<String, BotError> {
        let user = UserId::new(snowflake(user_id)?);
        let sent = user
            .direct_message(&self.http, text_message(text))
            .await
            .map_err(platform_error)?;
        Ok(sent.id.to_string())
    }

    async fn resolve_channel(&self, channel_id: &str) -> Result<bool, BotError> {
        let Ok(id) = snowflake(channel_id) else {
            return Ok(false);
        };
        match self.http.get_channel(ChannelId::new(id)).await {
            Ok(_) => Ok(true),
            Err(serenity::Error::Http(HttpError::UnsuccessfulRequest(response)))
                if response.status_code.as_u16() == 404 =>
            {
                Ok(false)
            }
            Err(e) => Err(platform_error(e)),
        }
    }

    async fn react(&self, message: &InboundMessage, emoji: &str) -> Result<(), BotError> {
        let channel = ChannelId::new(snowflake(&message.channel_id)?);
        let id = MessageId::new(snowflake(&message.id)?);
        channel
            .create_reaction(&self.http, id, ReactionType::Unicode(emoji.to_string()))
            .await
            .map_err(platform_error)
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Role side of Discord, scoped to the guild an event came from
pub struct DiscordRoles {
    http: Arc<Http>,
    guild_id: Option<GuildId>,
}

impl DiscordRoles {
    pub fn new(http: Arc<Http>, guild_id: Option<GuildId>) -> Self {
        Self { http, guild_id }
    }

    fn guild(&self) -> Result<GuildId, BotError> {
        self.guild_id
            .ok_or_else(|| BotError::NotFound("no guild for this message".to_string()))
    }
}

#[async_trait]
impl RoleRegistry for DiscordRoles {
    async fn roles(&self) -> Result<Vec<Role>, BotError> {
        let roles = self.guild()?.roles(&self.http).await.map_err(platform_error)?;
        Ok(roles.values().map(to_role).collect())
    }

    async fn create_role(&self, new: NewRole) -> Result<Role, BotError> {
        let mut builder = EditRole::new().name(new.name).mentionable(new.mentionable);
        if let Some(colour) = new.colour {
            builder = builder.colour(colour);
        }
        if let Some(position) = new.position {
            builder = builder.position(position);
        }

        let created = self
            .guild()?
            .create_role(&self.http, builder)
            .await
            .map_err(platform_error)?;
        Ok(to_role(&created).with_kind(new.kind))
    }

    async fn member_roles(&self, user_id: &str) -> Result<Vec<Role>, BotError> {
        let guild = self.guild()?;
        let member = guild
            .member(&self.http, UserId::new(snowflake(user_id)?))
            .await
            .map_err(platform_error)?;
        let roles = guild.roles(&self.http).await.map_err(platform_error)?;

        Ok(member
            .roles
            .iter()
            .filter_map(|id| roles.get(id))
            .map(to_role)
            .collect())
    }

    async fn add_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError> {
        self.http
            .add_member_role(
                self.guild()?,
                UserId::new(snowflake(user_id)?),
                RoleId::new(snowflake(role_id)?),
                None,
            )
            .await
            .map_err(platform_error)
    }

    async fn remove_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError> {
        self.http
            .remove_member_role(
                self.guild()?,
                UserId::new(snowflake(user_id)?),
                RoleId::new(snowflake(role_id)?),
                None,
            )
            .await
            .map_err(platform_error)
    }
}

/// Discord bot event handler
struct Handler {
    dispatcher: MessageDispatcher,
    name: String,
    activity: Option<String>,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("Logged in as {}", ready.user.name);

        if let Some(activity) = &self.activity {
            ctx.set_activity(Some(ActivityData::watching(activity.clone())));
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let inbound = to_inbound(&msg);
        let info = BotInfo {
            id: ctx.cache.current_user().id.to_string(),
            name: self.name.clone(),
        };
        let bot = DiscordAdapter::new(ctx.http.clone(), info);
        let roles = DiscordRoles::new(ctx.http.clone(), msg.guild_id);

        let dispatch = self.dispatcher.process(&bot, &roles, &inbound).await;
        tracing::debug!("[{}] {:?}", inbound.channel_id, dispatch);
    }
}

/// Connect to Discord and process events until the client stops
pub async fn start_bot(config: &Config) -> Result<(), BotError> {
    let token = config
        .discord
        .token
        .clone()
        .ok_or_else(|| BotError::Config("DISCORD_TOKEN is not set".to_string()))?;

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler {
        dispatcher: MessageDispatcher::from_config(config),
        name: config.bot.name.clone(),
        activity: config.bot.activity.clone(),
    };

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| BotError::Config(format!("Failed to create Discord client: {}", e)))?;

    tracing::info!("Starting Discord bot: {}", config.bot.name);
    client.start().await.map_err(platform_error)
}
