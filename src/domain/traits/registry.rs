use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::{NewRole, Role};

/// RoleRegistry trait - the server-wide role store owned by the platform
///
/// Every call goes to the registry; callers must not cache results beyond
/// a single command.
#[async_trait]
pub trait RoleRegistry: Send + Sync {
    // Server roles
    async fn roles(&self) -> Result<Vec<Role>, BotError>;
    async fn create_role(&self, role: NewRole) -> Result<Role, BotError>;

    // Member roles
    async fn member_roles(&self, user_id: &str) -> Result<Vec<Role>, BotError>;
    async fn add_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError>;
    async fn remove_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError>;
}
