//! Console adapter for development/testing

use async_trait::async_trait;
use crate::domain::entities::{InboundMessage, Reply, User};
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Channel id used for every console guild message
pub const CONSOLE_CHANNEL: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    relay_channel_id: Option<String>,
}

impl ConsoleAdapter {
    pub fn new(relay_channel_id: Option<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "haven-bot".to_string(),
            },
            relay_channel_id,
        }
    }

    /// Turn a typed line into a message; `/dm <text>` simulates a direct message
    pub fn message_from_line(line: &str, seq: u64) -> InboundMessage {
        let author = User::new("console-user").with_username("you");
        match line.strip_prefix("/dm ") {
            Some(text) => InboundMessage::direct(seq.to_string(), "console-dm", author, text),
            None => InboundMessage::guild(seq.to_string(), CONSOLE_CHANNEL, author, line),
        }
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        let read = std::io::stdin().read_line(&mut input).ok()?;
        if read == 0 {
            return None;
        }
        Some(input.trim().to_string())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, channel_id: &str, reply: Reply) -> Result<String, BotError> {
        match reply {
            Reply::Text(text) => println!("[#{}] {}", channel_id, text),
            Reply::Embed(embed) => println!("[#{}] {}", channel_id, embed.to_plain_text()),
        }
        Ok("console_msg".to_string())
    }

    async fn reply(&self, message: &InboundMessage, text: &str) -> Result<String, BotError> {
        println!("[#{}] @{} {}", message.channel_id, message.author, text);
        Ok("console_msg".to_string())
    }

    async fn direct_message(&self, user_id: &str, text: &str) -> Result<String, BotError> {
        println!("[DM {}] {}", user_id, text);
        Ok("console_msg".to_string())
    }

    async fn resolve_channel(&self, channel_id: &str) -> Result<bool, BotError> {
        Ok(self.relay_channel_id.as_deref() == Some(channel_id))
    }

    async fn react(&self, message: &InboundMessage, emoji: &str) -> Result<(), BotError> {
        println!("[#{}] (reacted {} to message {})", message.channel_id, emoji, message.id);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
