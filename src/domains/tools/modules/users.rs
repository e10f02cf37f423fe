//! User tools: lookup, profile update, and block list management.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::{lines_or, text, truncate};
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::users::{
    self, BlockUserRequest, GetUserBlockListRequest, GetUsersRequest, UnblockUserRequest,
    UpdateUserRequest,
};

/// Users capability module.
pub struct UsersTools;

impl UsersTools {
    pub const GET_USERS: &'static str = "twitch_get_users";
    pub const UPDATE_USER: &'static str = "twitch_update_user";
    pub const GET_USER_BLOCK_LIST: &'static str = "twitch_get_user_block_list";
    pub const BLOCK_USER: &'static str = "twitch_block_user";
    pub const UNBLOCK_USER: &'static str = "twitch_unblock_user";
}

impl CapabilityModule for UsersTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<GetUsersRequest>(Self::GET_USERS, "Get user information by ID or login name"),
            tool::<UpdateUserRequest>(
                Self::UPDATE_USER,
                "Update the authenticated user's description",
            ),
            tool::<GetUserBlockListRequest>(
                Self::GET_USER_BLOCK_LIST,
                "Get list of users the broadcaster has blocked",
            ),
            tool::<BlockUserRequest>(Self::BLOCK_USER, "Block a user"),
            tool::<UnblockUserRequest>(Self::UNBLOCK_USER, "Unblock a user"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::GET_USERS.to_string(), handler(get_users)),
            (Self::UPDATE_USER.to_string(), handler(update_user)),
            (
                Self::GET_USER_BLOCK_LIST.to_string(),
                handler(get_user_block_list),
            ),
            (Self::BLOCK_USER.to_string(), handler(block_user)),
            (Self::UNBLOCK_USER.to_string(), handler(unblock_user)),
        ])
    }
}

async fn get_users(client: Arc<HelixClient>, req: GetUsersRequest) -> HandlerOutput {
    let result = users::get_users(&client, &req).await?;
    if result.data.is_empty() {
        return Ok(text("No users found"));
    }
    let formatted: Vec<String> = result
        .data
        .iter()
        .map(|u| {
            let kind = if u.broadcaster_type.is_empty() {
                "regular"
            } else {
                &u.broadcaster_type
            };
            format!(
                "- {} ({})\n  ID: {}\n  Type: {}\n  Description: {}",
                u.display_name,
                u.login,
                u.id,
                kind,
                truncate(&u.description, 100)
            )
        })
        .collect();
    Ok(text(formatted.join("\n")))
}

async fn update_user(client: Arc<HelixClient>, req: UpdateUserRequest) -> HandlerOutput {
    let user = users::update_user(&client, &req).await?;
    Ok(text(format!("User updated: {}", user.display_name)))
}

async fn get_user_block_list(
    client: Arc<HelixClient>,
    req: GetUserBlockListRequest,
) -> HandlerOutput {
    let result = users::get_user_block_list(&client, &req).await?;
    let blocked: Vec<String> = result
        .data
        .iter()
        .map(|b| format!("- {} ({})", b.display_name, b.user_id))
        .collect();
    Ok(lines_or("Blocked users:", blocked, "No blocked users"))
}

async fn block_user(client: Arc<HelixClient>, req: BlockUserRequest) -> HandlerOutput {
    users::block_user(&client, &req).await?;
    Ok(text("User blocked"))
}

async fn unblock_user(client: Arc<HelixClient>, req: UnblockUserRequest) -> HandlerOutput {
    users::unblock_user(&client, &req).await?;
    Ok(text("User unblocked"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = UsersTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 5);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }

    #[test]
    fn test_get_users_schema_has_no_required_fields() {
        let descriptors = UsersTools.describe();
        let get = descriptors
            .iter()
            .find(|t| t.name == UsersTools::GET_USERS)
            .unwrap();
        let schema = serde_json::to_value(get.input_schema.as_ref()).unwrap();
        let required = schema.get("required").and_then(|r| r.as_array());
        assert!(required.is_none_or(|r| r.is_empty()));
    }
}
