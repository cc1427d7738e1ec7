use super::User;
use chrono::{DateTime, Utc};

/// Where a message was posted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Private conversation between a user and the bot
    Direct,
    /// Channel belonging to the server
    Guild,
}

/// A message delivered by the host platform
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub channel_id: String,
    pub channel_kind: ChannelKind,
    pub author: User,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(
        id: impl Into<String>,
        channel_id: impl Into<String>,
        channel_kind: ChannelKind,
        author: User,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            channel_kind,
            author,
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    /// Message posted in a server channel
    pub fn guild(id: impl Into<String>, channel_id: impl Into<String>, author: User, text: impl Into<String>) -> Self {
        Self::new(id, channel_id, ChannelKind::Guild, author, text)
    }

    /// Message sent privately to the bot
    pub fn direct(id: impl Into<String>, channel_id: impl Into<String>, author: User, text: impl Into<String>) -> Self {
        Self::new(id, channel_id, ChannelKind::Direct, author, text)
    }

    pub fn with_received_at(mut self, at: DateTime<Utc>) -> Self {
        self.received_at = at;
        self
    }

    pub fn is_direct(&self) -> bool {
        self.channel_kind == ChannelKind::Direct
    }
}

/// A single name/value field of an embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

/// Structured rich content, rendered by the adapter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    pub title: String,
    pub description: Option<String>,
    pub colour: Option<u32>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Plain-text rendering for hosts without rich content
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("== {} ==", self.title);
        if let Some(description) = &self.description {
            out.push('\n');
            out.push_str(description);
        }
        for field in &self.fields {
            out.push_str(&format!("\n  {} - {}", field.name, field.value));
        }
        if let Some(footer) = &self.footer {
            out.push('\n');
            out.push_str(footer);
        }
        out
    }
}

/// Outgoing content produced by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl From<String> for Reply {
    fn from(s: String) -> Self {
        Reply::Text(s)
    }
}

impl From<&str> for Reply {
    fn from(s: &str) -> Self {
        Reply::Text(s.to_string())
    }
}

impl From<Embed> for Reply {
    fn from(embed: Embed) -> Self {
        Reply::Embed(embed)
    }
}
