//! Application layer errors

use thiserror::Error;

/// Failures reported by the host platform
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    /// Carries the usage hint shown to the caller
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// A platform call failed; `notice` is what the caller sees
    #[error("{notice}: {source}")]
    Failed {
        notice: String,
        #[source]
        source: BotError,
    },
}

impl CommandError {
    pub fn failed(notice: impl Into<String>, source: BotError) -> Self {
        CommandError::Failed {
            notice: notice.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
