//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Commands, role reconciliation, relay, reactions
//! - Errors: Domain-specific errors
//! - Messaging: Parsing, classification, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
