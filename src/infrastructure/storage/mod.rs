//! In-memory role registry used by the console host and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::BotError;
use crate::domain::entities::{NewRole, Role};
use crate::domain::traits::RoleRegistry;

/// Role registry held entirely in memory
#[derive(Default)]
pub struct MemoryRoleRegistry {
    roles: Arc<RwLock<Vec<Role>>>,
    members: Arc<RwLock<HashMap<String, Vec<String>>>>,
    next_id: AtomicU64,
}

impl MemoryRoleRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ..Default::default()
        }
    }

    fn allocate_id(&self) -> String {
        format!("role-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Seed an existing server role
    pub async fn insert_role(&self, role: Role) {
        let mut roles = self.roles.write().await;
        roles.retain(|r| r.id != role.id);
        roles.push(role);
    }

    /// Seed a role held by a member, bypassing validation
    pub async fn grant(&self, user_id: &str, role_id: &str) {
        let mut members = self.members.write().await;
        let held = members.entry(user_id.to_string()).or_default();
        if !held.iter().any(|id| id == role_id) {
            held.push(role_id.to_string());
        }
    }

    /// Names of the roles a member holds, in grant order
    pub async fn member_role_names(&self, user_id: &str) -> Vec<String> {
        self.member_roles(user_id)
            .await
            .map(|roles| roles.into_iter().map(|r| r.name).collect())
            .unwrap_or_default()
    }

    pub async fn role_count(&self) -> usize {
        self.roles.read().await.len()
    }
}

#[async_trait]
impl RoleRegistry for MemoryRoleRegistry {
    async fn roles(&self) -> Result<Vec<Role>, BotError> {
        let roles = self.roles.read().await;
        Ok(roles.clone())
    }

    async fn create_role(&self, new: NewRole) -> Result<Role, BotError> {
        let mut roles = self.roles.write().await;

        // Roles at or above the requested position move up one
        let position = match new.position {
            Some(position) => {
                for role in roles.iter_mut().filter(|r| r.position >= position) {
                    role.position = role.position.saturating_add(1);
                }
                position
            }
            None => 1,
        };

        let mut role = Role::new(self.allocate_id(), new.name)
            .with_position(position)
            .with_kind(new.kind);
        role.colour = new.colour;
        role.mentionable = new.mentionable;

        roles.push(role.clone());
        Ok(role)
    }

    async fn member_roles(&self, user_id: &str) -> Result<Vec<Role>, BotError> {
        let members = self.members.read().await;
        let roles = self.roles.read().await;

        let held = members.get(user_id).map(Vec::as_slice).unwrap_or_default();
        Ok(held
            .iter()
            .filter_map(|id| roles.iter().find(|r| &r.id == id).cloned())
            .collect())
    }

    async fn add_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError> {
        if !self.roles.read().await.iter().any(|r| r.id == role_id) {
            return Err(BotError::NotFound(format!("role {}", role_id)));
        }
        self.grant(user_id, role_id).await;
        Ok(())
    }

    async fn remove_member_role(&self, user_id: &str, role_id: &str) -> Result<(), BotError> {
        let mut members = self.members.write().await;
        if let Some(held) = members.get_mut(user_id) {
            held.retain(|id| id != role_id);
        }
        Ok(())
    }
}
