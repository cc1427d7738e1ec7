//! Message dispatcher - Routes classified messages to relay, commands and reactions

use crate::application::errors::CommandError;
use crate::application::services::{
    CommandService, CommandSettings, ReactionService, RelayOutcome, RelayService,
};
use crate::domain::entities::{InboundMessage, ParsedCommand, Reply};
use crate::domain::traits::{Bot, RoleRegistry};
use crate::infrastructure::config::Config;
use super::classifier::{EventClassifier, Route};
use super::parser::MessageParser;

/// Everything a command handler may touch while it runs
pub struct CommandContext<'a> {
    pub bot: &'a dyn Bot,
    pub registry: &'a dyn RoleRegistry,
    pub message: &'a InboundMessage,
    pub commands: &'a CommandService,
}

impl<'a> CommandContext<'a> {
    /// Reply to the invoking message; failures are logged only
    pub async fn reply(&self, text: &str) {
        if let Err(e) = self.bot.reply(self.message, text).await {
            tracing::error!("[{}] Failed to send reply: {}", self.message.channel_id, e);
        }
    }

    /// Post to the invoking channel; failures are logged only
    pub async fn send(&self, reply: impl Into<Reply>) {
        if let Err(e) = self.bot.send_message(&self.message.channel_id, reply.into()).await {
            tracing::error!("[{}] Failed to send message: {}", self.message.channel_id, e);
        }
    }

    pub fn user_id(&self) -> &str {
        &self.message.author.id
    }
}

/// What the dispatcher did with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Ignored,
    Relayed(RelayOutcome),
    /// Command name and whether it ran to completion
    Command { name: String, ok: bool },
    Passive,
}

/// Message dispatcher - one entry point per inbound event
pub struct MessageDispatcher {
    classifier: EventClassifier,
    commands: CommandService,
    relay: RelayService,
    reactions: ReactionService,
}

impl MessageDispatcher {
    pub fn new(
        commands: CommandService,
        relay: RelayService,
        reactions: ReactionService,
    ) -> Self {
        Self {
            classifier: EventClassifier::new(MessageParser::new(commands.prefix())),
            commands,
            relay,
            reactions,
        }
    }

    /// Dispatcher with the default command table and configured relay/reactions
    pub fn from_config(config: &Config) -> Self {
        let commands = CommandService::with_defaults(
            config.bot.prefix.clone(),
            CommandSettings {
                member_role_id: config.discord.member_role_id.clone(),
                resources: config.resources.clone(),
            },
        );
        Self::new(
            commands,
            RelayService::new(config.discord.relay_channel_id.clone()),
            ReactionService::new(config.reactions.clone()),
        )
    }

    /// Process a message through the pipeline
    ///
    /// Every error is handled here; nothing propagates to the caller.
    pub async fn process(
        &self,
        bot: &dyn Bot,
        registry: &dyn RoleRegistry,
        message: &InboundMessage,
    ) -> Dispatch {
        let classification = self.classifier.classify(message);

        let dispatch = match classification.route {
            Route::Ignore => return Dispatch::Ignored,
            Route::Relay => {
                let outcome = self.relay.relay(bot, message).await;
                return Dispatch::Relayed(outcome);
            }
            Route::Command(command) => {
                let name = command.name.clone();
                let ok = self.run_command(bot, registry, message, command).await;
                Dispatch::Command { name, ok }
            }
            Route::Passive => Dispatch::Passive,
        };

        if classification.scan_reactions {
            self.reactions.scan(bot, message).await;
        }

        dispatch
    }

    /// Run a parsed command, converting every error into a reply
    async fn run_command(
        &self,
        bot: &dyn Bot,
        registry: &dyn RoleRegistry,
        message: &InboundMessage,
        command: ParsedCommand,
    ) -> bool {
        let ctx = CommandContext {
            bot,
            registry,
            message,
            commands: &self.commands,
        };

        tracing::info!(
            "[{}] {} ran {}{} {:?}",
            message.channel_id,
            message.author,
            self.commands.prefix(),
            command.name,
            command.args
        );

        match self.commands.execute(&ctx, &command).await {
            Ok(()) => true,
            Err(CommandError::NotFound(name)) => {
                tracing::debug!("[{}] Unknown command: {}", message.channel_id, name);
                ctx.reply(&self.commands.unknown_command_notice()).await;
                false
            }
            Err(CommandError::InvalidArgs(hint)) => {
                tracing::debug!("[{}] Invalid arguments for {}", message.channel_id, command.name);
                ctx.reply(&hint).await;
                false
            }
            Err(CommandError::Failed { notice, source }) => {
                tracing::error!("[{}] {} failed: {}", message.channel_id, command.name, source);
                ctx.reply(&notice).await;
                false
            }
        }
    }
}
