use async_trait::async_trait;
use crate::domain::entities::{InboundMessage, Reply};
use crate::application::errors::BotError;

/// Bot trait - abstraction for the messaging side of the host platform
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send content to a channel
    async fn send_message(&self, channel_id: &str, reply: Reply) -> Result<String, BotError>;

    /// Reply to a message in its channel
    async fn reply(&self, message: &InboundMessage, text: &str) -> Result<String, BotError>;

    /// Send a private message to a user
    async fn direct_message(&self, user_id: &str, text: &str) -> Result<String, BotError>;

    /// Whether a channel id resolves to a channel the bot can see
    async fn resolve_channel(&self, channel_id: &str) -> Result<bool, BotError>;

    /// Attach a reaction to a message
    async fn react(&self, message: &InboundMessage, emoji: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
