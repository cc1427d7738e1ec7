//! Shared test doubles: a recording bot and a registry with failure injection

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, Once};

use haven_bot::application::errors::BotError;
use haven_bot::application::messaging::MessageDispatcher;
use haven_bot::domain::entities::{InboundMessage, NewRole, Reply, Role, User};
use haven_bot::domain::traits::{Bot, BotInfo, RoleRegistry};
use haven_bot::infrastructure::config::Config;
use haven_bot::infrastructure::storage::MemoryRoleRegistry;

pub const RELAY_CHANNEL: &str = "900";
pub const GENERAL: &str = "100";
pub const MEMBER_ROLE: &str = "member";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Something the bot sent
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Channel { channel_id: String, reply: Reply },
    Reply { message_id: String, text: String },
    Dm { user_id: String, text: String },
    Reaction { message_id: String, emoji: String },
}

/// Bot that records everything and can be told to fail
#[derive(Default)]
pub struct RecordingBot {
    pub sent: Mutex<Vec<Sent>>,
    pub channels: Mutex<HashSet<String>>,
    pub fail_channel_send: Mutex<bool>,
    pub fail_react: Mutex<bool>,
}

impl RecordingBot {
    pub fn new() -> Self {
        let bot = Self::default();
        bot.channels.lock().unwrap().insert(RELAY_CHANNEL.to_string());
        bot.channels.lock().unwrap().insert(GENERAL.to_string());
        bot
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Reply { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn channel_posts(&self, channel: &str) -> Vec<Reply> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Channel { channel_id, reply } if channel_id == channel => Some(reply),
                _ => None,
            })
            .collect()
    }

    pub fn dms(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Dm { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn reactions(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Reaction { emoji, .. } => Some(emoji),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, channel_id: &str, reply: Reply) -> Result<String, BotError> {
        if *self.fail_channel_send.lock().unwrap() {
            return Err(BotError::PermissionDenied("Missing Permissions".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Channel {
            channel_id: channel_id.to_string(),
            reply,
        });
        Ok("sent".to_string())
    }

    async fn reply(&self, message: &InboundMessage, text: &str) -> Result<String, BotError> {
        self.sent.lock().unwrap().push(Sent::Reply {
            message_id: message.id.clone(),
            text: text.to_string(),
        });
        Ok("reply".to_string())
    }

    async fn direct_message(&self, user_id: &str, text: &str) -> Result<String, BotError> {
        self.sent.lock().unwrap().push(Sent::Dm {
            user_id: user_id.to_string(),
            text: text.to_string(),
        });
        Ok("dm".to_string())
    }

    async fn resolve_channel(&self, channel_id: &str) -> Result<bool, BotError> {
        Ok(self.channels.lock().unwrap().contains(channel_id))
    }

    async fn react(&self, message: &InboundMessage, emoji: &str) -> Result<(), BotError> {
        if *self.fail_react.lock().unwrap() {
            return Err(BotError::Network("reaction rejected".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Reaction {
            message_id: message.id.clone(),
            emoji: emoji.to_string(),
        });
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "bot".to_string(),
            name: "haven-bot".to_string(),
        }
    }
}

/// Registry operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Roles,
    Create,
    MemberRoles,
    Add,
    Remove,
}

/// Memory registry wrapper counting mutations and injecting failures
pub struct FlakyRegistry {
    pub inner: MemoryRoleRegistry,
    pub failing: Mutex<HashSet<Op>>,
    pub mutations: Mutex<Vec<Op>>,
}

impl FlakyRegistry {
    pub fn new() -> Self {
        Self {
            inner: MemoryRoleRegistry::new(),
            failing: Mutex::new(HashSet::new()),
            mutations: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn mutations(&self) -> Vec<Op> {
        self.mutations.lock().unwrap().clone()
    }

    fn check(&self, op: Op) -> Result<(), BotError> {
        if self.failing.lock().unwrap().contains(&op) {
            return Err(BotError::PermissionDenied(format!("{:?} rejected", op)));
        }
        if matches!(op, Op::Create | Op::Add | Op::Remove) {
            self.mutations.lock().unwrap().push(op);
        }
        Ok(())
    }
}

#[async_trait]
impl RoleRegistry for FlakyRegistry {
    async fn roles(&self) -> Result<Vec<Role>, BotError> {
        self.check(Op::Roles)?;
        self.inner.roles().await
    }

    async fn create_role(&self, role: NewRole) -> Result<Role, BotError> {
        self.check(Op::Create)?;
        self.inner.create_role(role).await
    }

    async fn member_roles(&self, user_id: &str) -> Result<Vec<Role>, BotError> {
        self.check(Op::MemberRoles)?;
        self.inner.member_roles(user_id).await
    }

    async fn add_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError> {
        self.check(Op::Add)?;
        self.inner.add_member_role(user_id, role_id).await
    }

    async fn remove_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError> {
        self.check(Op::Remove)?;
        self.inner.remove_member_role(user_id, role_id).await
    }
}

pub fn config() -> Config {
    let mut config = Config::default();
    config.discord.relay_channel_id = Some(RELAY_CHANNEL.to_string());
    config.discord.member_role_id = Some(MEMBER_ROLE.to_string());
    config
}

pub fn dispatcher() -> MessageDispatcher {
    ensure_init();
    MessageDispatcher::from_config(&config())
}

pub fn member() -> User {
    User::new("42").with_username("river")
}

pub fn guild_message(id: &str, text: &str) -> InboundMessage {
    InboundMessage::guild(id, GENERAL, member(), text)
}

pub fn direct_message(id: &str, text: &str) -> InboundMessage {
    InboundMessage::direct(id, "dm-42", member(), text)
}
