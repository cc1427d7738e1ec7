//! Message parser - Splits prefixed text into a command name and arguments

use crate::domain::entities::ParsedCommand;

/// Parses prefixed text into `ParsedCommand`s
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    pub fn is_command(&self, text: &str) -> bool {
        text.starts_with(&self.command_prefix)
    }

    /// Parse a command; `None` when the text does not start with the prefix
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        // Only the first prefix is stripped, so `!!help` has the name `!help`
        let cmd_text = text.strip_prefix(&self.command_prefix)?;

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let args = parts.map(|s| s.to_string()).collect();

        Some(ParsedCommand::new(name, args))
    }
}
