//! Domain traits - Abstractions for host platform implementations

pub mod bot;
pub mod registry;

pub use bot::{Bot, BotInfo};
pub use registry::RoleRegistry;
