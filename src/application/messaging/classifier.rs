//! Event classifier - Decides which path an inbound message takes

use crate::domain::entities::{InboundMessage, ParsedCommand};
use super::parser::MessageParser;

/// Primary path for a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Automated author, dropped without a response
    Ignore,
    /// Direct message forwarded to the relay channel
    Relay,
    /// Prefixed server-channel message
    Command(ParsedCommand),
    /// Server-channel message without the prefix
    Passive,
}

/// Result of classifying one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub route: Route,
    /// Passive keyword scan runs alongside the route, never for DMs
    pub scan_reactions: bool,
}

/// Routes messages by author, channel kind and prefix
#[derive(Debug, Clone)]
pub struct EventClassifier {
    parser: MessageParser,
}

impl EventClassifier {
    pub fn new(parser: MessageParser) -> Self {
        Self { parser }
    }

    pub fn classify(&self, message: &InboundMessage) -> Classification {
        if message.author.is_bot {
            return Classification {
                route: Route::Ignore,
                scan_reactions: false,
            };
        }

        if message.is_direct() {
            return Classification {
                route: Route::Relay,
                scan_reactions: false,
            };
        }

        let route = match self.parser.parse(&message.text) {
            Some(command) => Route::Command(command),
            None => Route::Passive,
        };

        Classification {
            route,
            scan_reactions: true,
        }
    }
}
