//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: In-memory role registry
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod storage;
pub mod adapters;
