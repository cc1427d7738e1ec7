//! Passive keyword reactions

use crate::domain::entities::InboundMessage;
use crate::domain::traits::Bot;
use crate::infrastructure::config::ReactionTrigger;

/// Reacts to messages containing configured trigger substrings
#[derive(Debug, Clone)]
pub struct ReactionService {
    triggers: Vec<ReactionTrigger>,
}

impl ReactionService {
    pub fn new(triggers: Vec<ReactionTrigger>) -> Self {
        let triggers = triggers
            .into_iter()
            .filter(|t| !t.trigger.is_empty())
            .map(|t| ReactionTrigger {
                trigger: t.trigger.to_lowercase(),
                emoji: t.emoji,
            })
            .collect();
        Self { triggers }
    }

    /// Triggers contained in the text, case-insensitively
    pub fn matching(&self, text: &str) -> Vec<&ReactionTrigger> {
        let lowered = text.to_lowercase();
        self.triggers
            .iter()
            .filter(|t| lowered.contains(&t.trigger))
            .collect()
    }

    /// Attempt every matching reaction; returns how many succeeded
    pub async fn scan(&self, bot: &dyn Bot, message: &InboundMessage) -> usize {
        let mut reacted = 0;
        for trigger in self.matching(&message.text) {
            match bot.react(message, &trigger.emoji).await {
                Ok(()) => reacted += 1,
                Err(e) => tracing::warn!("[{}] Failed to react with {}: {}", message.channel_id, trigger.emoji, e),
            }
        }
        reacted
    }
}
