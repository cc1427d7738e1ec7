//! Role reconciliation for the pronoun and colour families

use async_trait::async_trait;

use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::CommandContext;
use crate::domain::entities::{Arguments, CommandHandler, HexColor, NewRole, Role};
use crate::domain::traits::RoleRegistry;

const PRONOUN_CREATE_FAILED: &str =
    "I couldn't create the role. Please ensure I have the `Manage Roles` permission.";
const PRONOUN_ASSIGN_FAILED: &str =
    "I encountered an error while trying to assign your role. Please ensure I have the necessary permissions.";
const COLOR_CREATE_FAILED: &str =
    "I couldn't create the color role. Please ensure I have the `Manage Roles` permission.";
const COLOR_REMOVE_FAILED: &str = "I couldn't remove your existing colour roles.";
const COLOR_ASSIGN_FAILED: &str =
    "I couldn't assign the color role. Please ensure I have the necessary permissions.";

/// A role looked up or created on demand
#[derive(Debug, Clone)]
pub struct Resolved {
    pub role: Role,
    pub created: bool,
}

/// Role lookups and mutations against the registry
pub struct RoleService<'a> {
    registry: &'a dyn RoleRegistry,
}

impl<'a> RoleService<'a> {
    pub fn new(registry: &'a dyn RoleRegistry) -> Self {
        Self { registry }
    }

    /// Find a pronoun role by case-insensitive name, creating it if absent
    ///
    /// Colour-family roles and the member role are never handed out here.
    pub async fn ensure_pronoun_role(
        &self,
        pronouns: &str,
        member_role_id: Option<&str>,
    ) -> Result<Resolved, BotError> {
        let lowered = pronouns.to_lowercase();
        let roles = self.registry.roles().await?;

        let candidate = roles.into_iter().find(|r| {
            !r.is_color()
                && Some(r.id.as_str()) != member_role_id
                && r.name_matches_ignore_case(&lowered)
        });
        if let Some(role) = candidate {
            return Ok(Resolved { role, created: false });
        }

        let colour = rand::random::<u32>() & 0xFF_FFFF;
        let role = self.registry.create_role(NewRole::pronoun(pronouns, colour)).await?;
        Ok(Resolved { role, created: true })
    }

    /// Find a colour role by exact name, creating it above the member role if absent
    pub async fn ensure_color_role(
        &self,
        hex: &HexColor,
        member_role_id: Option<&str>,
    ) -> Result<Resolved, BotError> {
        let name = hex.role_name();
        let roles = self.registry.roles().await?;

        if let Some(role) = roles.iter().find(|r| r.name == name) {
            return Ok(Resolved { role: role.clone(), created: false });
        }

        let mut new_role = NewRole::color(hex);
        if let Some(reference_id) = member_role_id {
            match roles.iter().find(|r| r.id == reference_id) {
                Some(reference) => new_role = new_role.with_position(reference.position.saturating_add(1)),
                None => tracing::warn!("Member role {} not found, creating {} unpositioned", reference_id, name),
            }
        }

        let role = self.registry.create_role(new_role).await?;
        Ok(Resolved { role, created: true })
    }

    /// Remove every colour-family role the member holds; returns how many
    pub async fn clear_color_roles(&self, user_id: &str) -> Result<usize, BotError> {
        let held = self.registry.member_roles(user_id).await?;
        let mut removed = 0;
        for role in held.iter().filter(|r| r.is_color()) {
            self.registry.remove_member_role(user_id, &role.id).await?;
            removed += 1;
        }
        Ok(removed)
    }

    pub async fn assign(&self, user_id: &str, role: &Role) -> Result<(), BotError> {
        self.registry.add_member_role(user_id, &role.id).await
    }
}

/// `pronouns`
pub struct PronounsHandler {
    member_role_id: Option<String>,
}

impl PronounsHandler {
    pub fn new(member_role_id: Option<String>) -> Self {
        Self { member_role_id }
    }
}

#[async_trait]
impl CommandHandler for PronounsHandler {
    async fn handle(&self, ctx: &CommandContext<'_>, args: Arguments) -> Result<(), CommandError> {
        let Arguments::Text(pronouns) = args else {
            return Err(CommandError::InvalidArgs("pronouns needs some text".to_string()));
        };
        let roles = RoleService::new(ctx.registry);

        let resolved = roles.ensure_pronoun_role(&pronouns, self.member_role_id.as_deref()).await
            .map_err(|e| CommandError::failed(PRONOUN_CREATE_FAILED, e))?;
        if resolved.created {
            tracing::info!("Created pronoun role {} ({})", resolved.role.name, resolved.role.id);
            ctx.send(format!("Created a new role for pronouns: **{}**.", pronouns)).await;
        }

        roles.assign(ctx.user_id(), &resolved.role).await
            .map_err(|e| CommandError::failed(PRONOUN_ASSIGN_FAILED, e))?;

        ctx.reply(&format!(
            "Your pronouns have been set to **{}**, and the role has been assigned! 🌟",
            pronouns
        )).await;
        Ok(())
    }
}

/// `color` / `colour`
pub struct ColorHandler {
    member_role_id: Option<String>,
}

impl ColorHandler {
    pub fn new(member_role_id: Option<String>) -> Self {
        Self { member_role_id }
    }
}

#[async_trait]
impl CommandHandler for ColorHandler {
    async fn handle(&self, ctx: &CommandContext<'_>, args: Arguments) -> Result<(), CommandError> {
        let Arguments::Color(hex) = args else {
            return Err(CommandError::InvalidArgs("color needs a hex code".to_string()));
        };
        let roles = RoleService::new(ctx.registry);

        let resolved = roles.ensure_color_role(&hex, self.member_role_id.as_deref()).await
            .map_err(|e| CommandError::failed(COLOR_CREATE_FAILED, e))?;
        if resolved.created {
            tracing::info!("Created color role {} ({})", resolved.role.name, resolved.role.id);
            ctx.send(format!("Created a new color role: **{}**.", resolved.role.name)).await;
        }

        // Restores "at most one" even if several colour roles are held
        let removed = roles.clear_color_roles(ctx.user_id()).await
            .map_err(|e| CommandError::failed(COLOR_REMOVE_FAILED, e))?;
        tracing::debug!("Removed {} color roles from {}", removed, ctx.message.author);

        roles.assign(ctx.user_id(), &resolved.role).await
            .map_err(|e| CommandError::failed(COLOR_ASSIGN_FAILED, e))?;

        ctx.reply(&format!(
            "You have been assigned the color role: **{}**! 🎨",
            hex.role_name()
        )).await;
        Ok(())
    }
}
