//! haven-bot - community moderation bot for a single server
//!
//! Relays anonymous DMs to a venting channel, hands out pronoun and colour
//! roles, serves support resources and reacts to trigger keywords.

pub mod domain;
pub mod application;
pub mod infrastructure;
