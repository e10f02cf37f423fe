//! User endpoints: lookup, profile update, and block list management.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetUsersRequest {
    #[schemars(description = "User IDs")]
    pub id: Option<Vec<String>>,
    #[schemars(description = "User login names")]
    pub login: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub login: String,
    pub display_name: String,
    #[serde(default)]
    pub broadcaster_type: String,
    #[serde(default)]
    pub description: String,
}

/// GET /users
pub async fn get_users(
    client: &HelixClient,
    req: &GetUsersRequest,
) -> HelixResult<DataEnvelope<User>> {
    let mut query = Vec::new();
    for id in req.id.iter().flatten() {
        query.push(("id", id.clone()));
    }
    for login in req.login.iter().flatten() {
        query.push(("login", login.clone()));
    }
    client.get("users", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateUserRequest {
    #[schemars(description = "New channel description")]
    pub description: Option<String>,
}

/// PUT /users
pub async fn update_user(client: &HelixClient, req: &UpdateUserRequest) -> HelixResult<User> {
    let mut query = Vec::new();
    if let Some(description) = &req.description {
        query.push(("description", description.clone()));
    }
    let envelope: DataEnvelope<User> = client.put("users", &query, None).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetUserBlockListRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockedUser {
    pub user_id: String,
    pub user_login: String,
    pub display_name: String,
}

/// GET /users/blocks
pub async fn get_user_block_list(
    client: &HelixClient,
    req: &GetUserBlockListRequest,
) -> HelixResult<DataEnvelope<BlockedUser>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("users/blocks", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BlockUserRequest {
    #[schemars(description = "User ID to block")]
    pub target_user_id: String,
    #[schemars(description = "Context: chat or whisper")]
    pub source_context: Option<String>,
    #[schemars(description = "Reason: harassment, spam, or other")]
    pub reason: Option<String>,
}

/// PUT /users/blocks (204)
pub async fn block_user(client: &HelixClient, req: &BlockUserRequest) -> HelixResult<()> {
    let mut query = vec![("target_user_id", req.target_user_id.clone())];
    if let Some(context) = &req.source_context {
        query.push(("source_context", context.clone()));
    }
    if let Some(reason) = &req.reason {
        query.push(("reason", reason.clone()));
    }
    client.put_no_content("users/blocks", &query, None).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UnblockUserRequest {
    #[schemars(description = "User ID to unblock")]
    pub target_user_id: String,
}

/// DELETE /users/blocks (204)
pub async fn unblock_user(client: &HelixClient, req: &UnblockUserRequest) -> HelixResult<()> {
    let query = [("target_user_id", req.target_user_id.clone())];
    client.delete_no_content("users/blocks", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_users_request_all_optional() {
        let req: GetUsersRequest = serde_json::from_str("{}").unwrap();
        assert!(req.id.is_none());
        assert!(req.login.is_none());
    }

    #[test]
    fn test_user_decode_defaults() {
        let user: User = serde_json::from_str(
            r#"{"id": "1", "login": "streamer", "display_name": "Streamer"}"#,
        )
        .unwrap();
        assert!(user.broadcaster_type.is_empty());
        assert!(user.description.is_empty());
    }
}
