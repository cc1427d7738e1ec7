//! Application services - Command, role, relay and reaction logic

pub mod command_service;
pub mod reaction_service;
pub mod relay_service;
pub mod role_service;
pub mod uwu;

pub use command_service::{CommandService, CommandSettings};
pub use reaction_service::ReactionService;
pub use relay_service::{RelayOutcome, RelayService};
pub use role_service::RoleService;
pub use uwu::uwuify;
