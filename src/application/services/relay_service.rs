//! Anonymous relay of direct messages into the venting channel

use crate::domain::entities::{InboundMessage, Reply};
use crate::domain::traits::Bot;

pub const RELAY_LABEL: &str = "**Anonymous Vent:**";

/// Longest message the platform accepts, in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

const CHANNEL_UNAVAILABLE: &str =
    "The venting channel is not available on the server. Please ask a moderator to set it up.";
const DELIVERY_FAILED: &str =
    "I encountered an error while sending your message. Please try again later.";
const TOO_LONG: &str =
    "Your message is too long to relay. Please split it into shorter messages and send them one at a time.";
const DELIVERED: &str = "Your message has been sent anonymously to the venting channel. ❤️";

/// Result of relaying one direct message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    ChannelUnavailable,
    DeliveryFailed,
    /// Labelled text would exceed `MAX_MESSAGE_CHARS`
    TooLong,
}

/// Forwards DMs to a fixed channel without the sender's identity
#[derive(Debug, Clone)]
pub struct RelayService {
    channel_id: Option<String>,
}

impl RelayService {
    pub fn new(channel_id: Option<String>) -> Self {
        Self { channel_id }
    }

    /// Text posted to the relay channel
    pub fn format(text: &str) -> String {
        format!("{}\n{}", RELAY_LABEL, text)
    }

    pub async fn relay(&self, bot: &dyn Bot, message: &InboundMessage) -> RelayOutcome {
        let text = Self::format(&message.text);
        let length = text.chars().count();
        let outcome = if length > MAX_MESSAGE_CHARS {
            tracing::debug!("Relay text from a DM is too long ({} chars)", length);
            RelayOutcome::TooLong
        } else {
            match self.resolve(bot).await {
                None => RelayOutcome::ChannelUnavailable,
                Some(channel_id) => match bot.send_message(channel_id, Reply::Text(text)).await {
                    Ok(_) => RelayOutcome::Delivered,
                    Err(e) => {
                        tracing::error!("Failed to relay message to {}: {}", channel_id, e);
                        RelayOutcome::DeliveryFailed
                    }
                },
            }
        };

        let notice = match outcome {
            RelayOutcome::Delivered => DELIVERED,
            RelayOutcome::ChannelUnavailable => CHANNEL_UNAVAILABLE,
            RelayOutcome::DeliveryFailed => DELIVERY_FAILED,
            RelayOutcome::TooLong => TOO_LONG,
        };
        if let Err(e) = bot.direct_message(&message.author.id, notice).await {
            tracing::error!("Failed to notify relay sender: {}", e);
        }

        outcome
    }

    /// Configured channel id, if the platform can resolve it
    async fn resolve(&self, bot: &dyn Bot) -> Option<&str> {
        let Some(channel_id) = self.channel_id.as_deref() else {
            tracing::warn!("Relay channel is not configured");
            return None;
        };

        match bot.resolve_channel(channel_id).await {
            Ok(true) => Some(channel_id),
            Ok(false) => {
                tracing::warn!("Relay channel {} does not exist", channel_id);
                None
            }
            Err(e) => {
                tracing::error!("Failed to resolve relay channel {}: {}", channel_id, e);
                None
            }
        }
    }
}
