//! Domain layer - Core business logic with no platform dependencies
//! 
//! This layer contains:
//! - Entities: Core objects (User, InboundMessage, Command, Role)
//! - Traits: Abstractions for the host platform (Bot, RoleRegistry)
//! - Rules: Role family invariants

pub mod entities;
pub mod traits;
