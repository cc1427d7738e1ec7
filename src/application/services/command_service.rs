use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::{
    ArgumentRule, Arguments, Command, CommandHandler, CommandRegistry, Embed, ParsedCommand,
};
use crate::infrastructure::config::Resource;
use super::role_service::{ColorHandler, PronounsHandler};
use super::uwu::uwuify;

const HELP_COLOUR: u32 = 0xFF66B3;
const RESOURCES_COLOUR: u32 = 0x66CCFF;

/// Values the default commands are built from
#[derive(Debug, Clone, Default)]
pub struct CommandSettings {
    pub member_role_id: Option<String>,
    pub resources: Vec<Resource>,
}

/// Service for managing and executing commands
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    /// Command table with every built-in command registered
    pub fn with_defaults(prefix: impl Into<String>, settings: CommandSettings) -> Self {
        let mut service = Self::new(prefix);
        service.register_defaults(settings);
        service
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    pub fn register_defaults(&mut self, settings: CommandSettings) {
        let p = self.prefix.clone();

        self.register(Command::new("help")
            .with_description("Display this help message")
            .with_usage("help")
            .with_handler(HelpHandler));

        self.register(Command::new("pronouns")
            .with_description("Set your pronouns and assign a role")
            .with_usage("pronouns [your pronouns]")
            .with_arguments(
                ArgumentRule::Pronouns,
                format!("Please provide your pronouns. Example: `{}pronouns xe/xem`", p),
            )
            .with_handler(PronounsHandler::new(settings.member_role_id.clone())));

        self.register(Command::new("color")
            .with_description(format!("Choose a custom color role or create one (also `{}colour`)", p))
            .with_aliases(vec!["colour".to_string()])
            .with_usage("color [hex code]")
            .with_arguments(
                ArgumentRule::HexColor,
                format!("Please provide a valid hex color code. Example: `{}color #FF5733`", p),
            )
            .with_handler(ColorHandler::new(settings.member_role_id)));

        self.register(Command::new("resources")
            .with_description("Get a list of transgender resources")
            .with_usage("resources")
            .with_handler(ResourcesHandler::new(settings.resources)));

        self.register(Command::new("uwu")
            .with_description("Uwu-ify some text")
            .with_usage("uwu [text]")
            .with_arguments(
                ArgumentRule::FreeText,
                format!("Please give me something to uwu-ify. Example: `{}uwu hello there`", p),
            )
            .with_handler(UwuHandler));
    }

    /// Find, validate and run a parsed command
    pub async fn execute(&self, ctx: &CommandContext<'_>, parsed: &ParsedCommand) -> Result<(), CommandError> {
        let cmd = self.registry.find(&parsed.name)
            .ok_or_else(|| CommandError::NotFound(parsed.name.clone()))?;

        let args = cmd.validate(&parsed.args)?;

        match &cmd.handler {
            Some(handler) => handler.handle(ctx, args).await,
            None => Err(CommandError::NotFound(cmd.name.clone())),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn unknown_command_notice(&self) -> String {
        format!(
            "I don't recognize that command! Try `{}help` for a list of commands.",
            self.prefix
        )
    }

    /// Help listing built from the command table
    pub fn help_embed(&self) -> Embed {
        let mut embed = Embed::new("Help Commands")
            .with_colour(HELP_COLOUR)
            .with_description("Here are some commands you can use:")
            .with_footer("We love you and support you!");

        for cmd in self.registry.all() {
            let usage = cmd.usage.as_deref().unwrap_or(&cmd.name);
            embed = embed.with_field(
                format!("{}{}", self.prefix, usage),
                cmd.description.as_deref().unwrap_or(""),
            );
        }
        embed
    }
}

/// `help`
struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, ctx: &CommandContext<'_>, _args: Arguments) -> Result<(), CommandError> {
        ctx.send(ctx.commands.help_embed()).await;
        Ok(())
    }
}

/// `resources`
struct ResourcesHandler {
    resources: Vec<Resource>,
}

impl ResourcesHandler {
    fn new(resources: Vec<Resource>) -> Self {
        Self { resources }
    }

    fn embed(&self) -> Embed {
        let mut embed = Embed::new("Transgender Resources")
            .with_colour(RESOURCES_COLOUR)
            .with_description("Here are some resources to support you:")
            .with_footer("You are valid 💖");

        for resource in &self.resources {
            embed = embed.with_field(&resource.name, format!("[Visit Website]({})", resource.url));
        }
        embed
    }
}

#[async_trait]
impl CommandHandler for ResourcesHandler {
    async fn handle(&self, ctx: &CommandContext<'_>, _args: Arguments) -> Result<(), CommandError> {
        ctx.send(self.embed()).await;
        Ok(())
    }
}

/// `uwu`
struct UwuHandler;

#[async_trait]
impl CommandHandler for UwuHandler {
    async fn handle(&self, ctx: &CommandContext<'_>, args: Arguments) -> Result<(), CommandError> {
        let Arguments::Text(text) = args else {
            return Err(CommandError::InvalidArgs("uwu needs some text".to_string()));
        };
        ctx.reply(&uwuify(&text)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::Config;

    #[test]
    fn test_help_lists_every_command_with_prefix() {
        let service = CommandService::with_defaults("!", CommandSettings::default());
        let embed = service.help_embed();

        let names: Vec<&str> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["!help", "!pronouns [your pronouns]", "!color [hex code]", "!resources", "!uwu [text]"]
        );
        assert_eq!(embed.colour, Some(HELP_COLOUR));
    }

    #[test]
    fn test_unknown_notice_names_help() {
        let service = CommandService::new("?");
        assert!(service.unknown_command_notice().contains("`?help`"));
    }

    #[test]
    fn test_resources_embed_links_each_resource() {
        let handler = ResourcesHandler::new(Config::default().resources);
        let embed = handler.embed();
        assert_eq!(embed.fields.len(), 3);
        assert_eq!(embed.fields[0].name, "Trans Lifeline");
        assert_eq!(embed.fields[0].value, "[Visit Website](https://www.translifeline.org/)");
    }
}
