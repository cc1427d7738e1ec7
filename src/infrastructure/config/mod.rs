//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default = "default_reactions")]
    pub reactions: Vec<ReactionTrigger>,
    #[serde(default = "default_resources")]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub activity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    pub token: Option<String>,
    /// Channel anonymous DMs are forwarded to
    pub relay_channel_id: Option<String>,
    /// New colour roles are placed directly above this role
    pub member_role_id: Option<String>,
}

/// Substring that makes the bot react with an emoji
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReactionTrigger {
    pub trigger: String,
    pub emoji: String,
}

/// Support resource listed by `resources`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Resource {
    pub name: String,
    pub url: String,
}

fn default_reactions() -> Vec<ReactionTrigger> {
    vec![ReactionTrigger {
        trigger: "trans".to_string(),
        emoji: "🏳️‍⚧️".to_string(),
    }]
}

fn default_resources() -> Vec<Resource> {
    [
        ("Trans Lifeline", "https://www.translifeline.org/"),
        ("The Trevor Project", "https://www.thetrevorproject.org/"),
        ("National Center for Transgender Equality", "https://transequality.org/"),
    ]
    .into_iter()
    .map(|(name, url)| Resource {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "haven-bot".to_string(),
                prefix: "!".to_string(),
                activity: Some("Supporting Trans Rights 🏳️‍⚧️".to_string()),
            },
            discord: DiscordConfig::default(),
            reactions: default_reactions(),
            resources: default_resources(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override values from the process environment
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(token) = var("DISCORD_TOKEN").or_else(|| var("TOKEN")) {
            self.discord.token = Some(token);
        }

        if let Some(channel) = var("RELAY_CHANNEL_ID") {
            self.discord.relay_channel_id = Some(channel);
        }

        if let Some(role) = var("MEMBER_ROLE_ID") {
            self.discord.member_role_id = Some(role);
        }

        if let Some(prefix) = var("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!(
                "bot.prefix must not contain whitespace: {:?}",
                self.bot.prefix
            )));
        }

        let ids = [
            ("discord.relay-channel-id", &self.discord.relay_channel_id),
            ("discord.member-role-id", &self.discord.member_role_id),
        ];
        for (field, value) in ids {
            if let Some(id) = value {
                if id.parse::<u64>().map_or(true, |n| n == 0) {
                    return Err(ConfigError::InvalidValue(format!("{} must be a numeric id: {}", field, id)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.prefix, "!");
        assert_eq!(config.reactions[0].trigger, "trans");
        assert_eq!(config.resources.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_fills_missing_sections() {
        let yaml = "bot:\n  name: test\n  prefix: \"?\"\ndiscord:\n  relay-channel-id: \"123\"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.bot.prefix, "?");
        assert_eq!(config.discord.relay_channel_id.as_deref(), Some("123"));
        assert_eq!(config.reactions.len(), 1);
        assert_eq!(config.resources.len(), 3);
    }

    #[test]
    fn test_yaml_round_trips_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.resources, Config::default().resources);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TOKEN", "legacy"),
            ("RELAY_CHANNEL_ID", "42"),
            ("BOT_PREFIX", "$"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_vars(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.discord.token.as_deref(), Some("legacy"));
        assert_eq!(config.discord.relay_channel_id.as_deref(), Some("42"));
        assert_eq!(config.bot.prefix, "$");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.discord.relay_channel_id = Some("venting".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = Config::default();
        config.bot.prefix = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));

        let mut config = Config::default();
        config.bot.prefix = "! ".to_string();
        assert!(config.validate().is_err());
    }
}
