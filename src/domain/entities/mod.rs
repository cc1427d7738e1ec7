//! Domain entities - Core objects with no platform dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod role;

pub use user::User;
pub use message::{ChannelKind, Embed, EmbedField, InboundMessage, Reply};
pub use command::{ArgumentRule, Arguments, Command, CommandHandler, CommandRegistry, ParsedCommand};
pub use role::{HexColor, NewRole, Role, RoleKind, COLOR_ROLE_PREFIX};
