//! Moderation tools: bans, warnings, message deletion, moderators, blocked
//! terms, and shield mode.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::{lines_or, text};
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::moderation::{
    self, AddBlockedTermRequest, AddModeratorRequest, BanUserRequest, DeleteChatMessagesRequest,
    GetBannedUsersRequest, GetBlockedTermsRequest, GetModeratorsRequest,
    GetShieldModeStatusRequest, RemoveModeratorRequest, UnbanUserRequest,
    UpdateShieldModeStatusRequest, WarnUserRequest,
};

/// Moderation capability module.
pub struct ModerationTools;

impl ModerationTools {
    pub const BAN_USER: &'static str = "twitch_ban_user";
    pub const UNBAN_USER: &'static str = "twitch_unban_user";
    pub const GET_BANNED_USERS: &'static str = "twitch_get_banned_users";
    pub const WARN_USER: &'static str = "twitch_warn_user";
    pub const DELETE_CHAT_MESSAGES: &'static str = "twitch_delete_chat_messages";
    pub const GET_MODERATORS: &'static str = "twitch_get_moderators";
    pub const ADD_MODERATOR: &'static str = "twitch_add_moderator";
    pub const REMOVE_MODERATOR: &'static str = "twitch_remove_moderator";
    pub const GET_BLOCKED_TERMS: &'static str = "twitch_get_blocked_terms";
    pub const ADD_BLOCKED_TERM: &'static str = "twitch_add_blocked_term";
    pub const GET_SHIELD_MODE_STATUS: &'static str = "twitch_get_shield_mode_status";
    pub const UPDATE_SHIELD_MODE: &'static str = "twitch_update_shield_mode";
}

impl CapabilityModule for ModerationTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<BanUserRequest>(Self::BAN_USER, "Ban a user from a channel"),
            tool::<UnbanUserRequest>(Self::UNBAN_USER, "Unban a user from a channel"),
            tool::<GetBannedUsersRequest>(Self::GET_BANNED_USERS, "Get list of banned users"),
            tool::<WarnUserRequest>(Self::WARN_USER, "Send a warning to a user in chat"),
            tool::<DeleteChatMessagesRequest>(
                Self::DELETE_CHAT_MESSAGES,
                "Delete chat messages (specific message or all)",
            ),
            tool::<GetModeratorsRequest>(
                Self::GET_MODERATORS,
                "Get list of moderators for a channel",
            ),
            tool::<AddModeratorRequest>(Self::ADD_MODERATOR, "Add a moderator to the channel"),
            tool::<RemoveModeratorRequest>(
                Self::REMOVE_MODERATOR,
                "Remove a moderator from the channel",
            ),
            tool::<GetBlockedTermsRequest>(Self::GET_BLOCKED_TERMS, "Get list of blocked terms"),
            tool::<AddBlockedTermRequest>(Self::ADD_BLOCKED_TERM, "Add a blocked term"),
            tool::<GetShieldModeStatusRequest>(
                Self::GET_SHIELD_MODE_STATUS,
                "Get shield mode status",
            ),
            tool::<UpdateShieldModeStatusRequest>(
                Self::UPDATE_SHIELD_MODE,
                "Enable or disable shield mode",
            ),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::BAN_USER.to_string(), handler(ban_user)),
            (Self::UNBAN_USER.to_string(), handler(unban_user)),
            (Self::GET_BANNED_USERS.to_string(), handler(get_banned_users)),
            (Self::WARN_USER.to_string(), handler(warn_user)),
            (
                Self::DELETE_CHAT_MESSAGES.to_string(),
                handler(delete_chat_messages),
            ),
            (Self::GET_MODERATORS.to_string(), handler(get_moderators)),
            (Self::ADD_MODERATOR.to_string(), handler(add_moderator)),
            (Self::REMOVE_MODERATOR.to_string(), handler(remove_moderator)),
            (Self::GET_BLOCKED_TERMS.to_string(), handler(get_blocked_terms)),
            (Self::ADD_BLOCKED_TERM.to_string(), handler(add_blocked_term)),
            (
                Self::GET_SHIELD_MODE_STATUS.to_string(),
                handler(get_shield_mode_status),
            ),
            (Self::UPDATE_SHIELD_MODE.to_string(), handler(update_shield_mode)),
        ])
    }
}

async fn ban_user(client: Arc<HelixClient>, req: BanUserRequest) -> HandlerOutput {
    let ban = moderation::ban_user(&client, &req).await?;
    let until = ban.end_time.as_deref().unwrap_or("permanent");
    Ok(text(format!("User {} banned until {}", ban.user_id, until)))
}

async fn unban_user(client: Arc<HelixClient>, req: UnbanUserRequest) -> HandlerOutput {
    moderation::unban_user(&client, &req).await?;
    Ok(text("User unbanned successfully"))
}

async fn get_banned_users(client: Arc<HelixClient>, req: GetBannedUsersRequest) -> HandlerOutput {
    let result = moderation::get_banned_users(&client, &req).await?;
    let banned: Vec<String> = result
        .data
        .iter()
        .map(|b| {
            let reason = if b.reason.is_empty() {
                "No reason"
            } else {
                &b.reason
            };
            let expires = if b.expires_at.is_empty() {
                "never"
            } else {
                &b.expires_at
            };
            format!("- {}: {} (expires: {})", b.user_name, reason, expires)
        })
        .collect();
    Ok(lines_or("Banned users:", banned, "No banned users"))
}

async fn warn_user(client: Arc<HelixClient>, req: WarnUserRequest) -> HandlerOutput {
    let warning = moderation::warn_chat_user(&client, &req).await?;
    Ok(text(format!("Warning sent to user {}", warning.user_id)))
}

async fn delete_chat_messages(
    client: Arc<HelixClient>,
    req: DeleteChatMessagesRequest,
) -> HandlerOutput {
    let specific = req.message_id.is_some();
    moderation::delete_chat_messages(&client, &req).await?;
    let message = if specific {
        "Specific message deleted"
    } else {
        "All chat messages cleared"
    };
    Ok(text(message))
}

async fn get_moderators(client: Arc<HelixClient>, req: GetModeratorsRequest) -> HandlerOutput {
    let result = moderation::get_moderators(&client, &req).await?;
    let mods: Vec<String> = result
        .data
        .iter()
        .map(|m| format!("- {}", m.user_name))
        .collect();
    Ok(lines_or("Moderators:", mods, "No moderators"))
}

async fn add_moderator(client: Arc<HelixClient>, req: AddModeratorRequest) -> HandlerOutput {
    moderation::add_moderator(&client, &req).await?;
    Ok(text("Moderator added"))
}

async fn remove_moderator(client: Arc<HelixClient>, req: RemoveModeratorRequest) -> HandlerOutput {
    moderation::remove_moderator(&client, &req).await?;
    Ok(text("Moderator removed"))
}

async fn get_blocked_terms(client: Arc<HelixClient>, req: GetBlockedTermsRequest) -> HandlerOutput {
    let result = moderation::get_blocked_terms(&client, &req).await?;
    let terms: Vec<String> = result
        .data
        .iter()
        .map(|t| format!("- {}", t.text))
        .collect();
    Ok(lines_or("Blocked terms:", terms, "No blocked terms"))
}

async fn add_blocked_term(client: Arc<HelixClient>, req: AddBlockedTermRequest) -> HandlerOutput {
    let term = moderation::add_blocked_term(&client, &req).await?;
    Ok(text(format!("Blocked term added: {}", term.text)))
}

async fn get_shield_mode_status(
    client: Arc<HelixClient>,
    req: GetShieldModeStatusRequest,
) -> HandlerOutput {
    let status = moderation::get_shield_mode_status(&client, &req).await?;
    let state = if status.is_active { "ACTIVE" } else { "INACTIVE" };
    Ok(text(format!("Shield mode: {}", state)))
}

async fn update_shield_mode(
    client: Arc<HelixClient>,
    req: UpdateShieldModeStatusRequest,
) -> HandlerOutput {
    let status = moderation::update_shield_mode_status(&client, &req).await?;
    let state = if status.is_active { "enabled" } else { "disabled" };
    Ok(text(format!("Shield mode {}", state)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = ModerationTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 12);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }

    #[test]
    fn test_ban_schema_duration_optional() {
        let descriptors = ModerationTools.describe();
        let ban = descriptors
            .iter()
            .find(|t| t.name == ModerationTools::BAN_USER)
            .unwrap();
        let schema = serde_json::to_value(ban.input_schema.as_ref()).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "user_id"));
        assert!(!required.iter().any(|v| v == "duration"));
        assert!(!required.iter().any(|v| v == "reason"));
    }
}
