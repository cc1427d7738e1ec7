use std::sync::Arc;
use async_trait::async_trait;

use super::{HexColor, COLOR_ROLE_PREFIX};
use crate::application::errors::CommandError;
use crate::application::messaging::dispatcher::CommandContext;

/// A prefixed message split into its name and argument tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Shape of the arguments a command accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRule {
    /// Arguments are ignored
    None,
    /// At least one token, joined with single spaces
    FreeText,
    /// Free text that cannot be mistaken for a colour-family role name
    Pronouns,
    /// Exactly one `#RGB` / `#RRGGBB` token
    HexColor,
}

/// Arguments after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    None,
    Text(String),
    Color(HexColor),
}

impl ArgumentRule {
    pub fn validate(&self, args: &[String]) -> Option<Arguments> {
        match self {
            ArgumentRule::None => Some(Arguments::None),
            ArgumentRule::FreeText => {
                let text = args.join(" ");
                if text.trim().is_empty() {
                    None
                } else {
                    Some(Arguments::Text(text))
                }
            }
            ArgumentRule::Pronouns => {
                let prefix = COLOR_ROLE_PREFIX.to_lowercase();
                ArgumentRule::FreeText
                    .validate(args)
                    .filter(|a| !matches!(a, Arguments::Text(t) if t.to_lowercase().starts_with(&prefix)))
            }
            ArgumentRule::HexColor => match args {
                [token] => HexColor::parse(token).map(Arguments::Color),
                _ => None,
            },
        }
    }
}

/// Executes a validated command
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext<'_>, args: Arguments) -> Result<(), CommandError>;
}

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub aliases: Vec<String>,
    pub usage: Option<String>,
    pub arguments: ArgumentRule,
    pub invalid_hint: Option<String>,
    pub handler: Option<Arc<dyn CommandHandler>>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            usage: None,
            arguments: ArgumentRule::None,
            invalid_hint: None,
            handler: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Validator plus the hint replied when validation fails
    pub fn with_arguments(mut self, rule: ArgumentRule, invalid_hint: impl Into<String>) -> Self {
        self.arguments = rule;
        self.invalid_hint = Some(invalid_hint.into());
        self
    }

    pub fn with_handler<H>(mut self, handler: H) -> Self
    where
        H: CommandHandler + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn matches(&self, input: &str) -> bool {
        let input_lower = input.to_lowercase();
        self.name.to_lowercase() == input_lower ||
            self.aliases.iter().any(|a| a.to_lowercase() == input_lower)
    }

    /// Validate raw tokens against this command's rule
    pub fn validate(&self, args: &[String]) -> Result<Arguments, CommandError> {
        self.arguments.validate(args).ok_or_else(|| {
            CommandError::InvalidArgs(
                self.invalid_hint
                    .clone()
                    .unwrap_or_else(|| format!("Invalid arguments for {}", self.name)),
            )
        })
    }
}

/// Ordered table of available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any existing one with the same name
    pub fn register(&mut self, command: Command) {
        self.commands.retain(|c| c.name != command.name);
        self.commands.push(command);
    }

    pub fn find(&self, input: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(input))
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
