//! Moderation endpoints: bans, warnings, message deletion, moderators,
//! blocked terms, and shield mode.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BanUserRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "User ID to ban")]
    pub user_id: String,
    #[schemars(description = "Timeout duration in seconds (omit for permanent)")]
    pub duration: Option<u64>,
    #[schemars(description = "Reason for the ban")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ban {
    pub broadcaster_id: String,
    pub moderator_id: String,
    pub user_id: String,
    pub created_at: String,
    #[serde(default)]
    pub end_time: Option<String>,
}

/// POST /moderation/bans
pub async fn ban_user(client: &HelixClient, req: &BanUserRequest) -> HelixResult<Ban> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let mut data = json!({ "user_id": req.user_id });
    if let Some(duration) = req.duration {
        data["duration"] = Value::from(duration);
    }
    if let Some(reason) = &req.reason {
        data["reason"] = Value::String(reason.clone());
    }
    let envelope: DataEnvelope<Ban> = client
        .post("moderation/bans", &query, Some(json!({ "data": data })))
        .await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UnbanUserRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "User ID to unban")]
    pub user_id: String,
}

/// DELETE /moderation/bans (204)
pub async fn unban_user(client: &HelixClient, req: &UnbanUserRequest) -> HelixResult<()> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
        ("user_id", req.user_id.clone()),
    ];
    client.delete_no_content("moderation/bans", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBannedUsersRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BannedUser {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    /// Empty string for a permanent ban.
    #[serde(default)]
    pub expires_at: String,
    #[serde(default)]
    pub reason: String,
}

/// GET /moderation/banned
pub async fn get_banned_users(
    client: &HelixClient,
    req: &GetBannedUsersRequest,
) -> HelixResult<DataEnvelope<BannedUser>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("moderation/banned", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WarnUserRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "User ID to warn")]
    pub user_id: String,
    #[schemars(description = "Reason for the warning")]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Warning {
    pub broadcaster_id: String,
    pub user_id: String,
    pub moderator_id: String,
    pub reason: String,
}

/// POST /moderation/warnings
pub async fn warn_chat_user(client: &HelixClient, req: &WarnUserRequest) -> HelixResult<Warning> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let body = json!({ "data": { "user_id": req.user_id, "reason": req.reason } });
    let envelope: DataEnvelope<Warning> = client
        .post("moderation/warnings", &query, Some(body))
        .await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteChatMessagesRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "Specific message ID to delete (omit to clear all)")]
    pub message_id: Option<String>,
}

/// DELETE /moderation/chat (204)
pub async fn delete_chat_messages(
    client: &HelixClient,
    req: &DeleteChatMessagesRequest,
) -> HelixResult<()> {
    let mut query = vec![
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    if let Some(message_id) = &req.message_id {
        query.push(("message_id", message_id.clone()));
    }
    client.delete_no_content("moderation/chat", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetModeratorsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelUser {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}

/// GET /moderation/moderators
pub async fn get_moderators(
    client: &HelixClient,
    req: &GetModeratorsRequest,
) -> HelixResult<DataEnvelope<ChannelUser>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("moderation/moderators", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddModeratorRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "User ID to make moderator")]
    pub user_id: String,
}

/// POST /moderation/moderators (204)
pub async fn add_moderator(client: &HelixClient, req: &AddModeratorRequest) -> HelixResult<()> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("user_id", req.user_id.clone()),
    ];
    client
        .post_no_content("moderation/moderators", &query, None)
        .await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RemoveModeratorRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "User ID to remove as moderator")]
    pub user_id: String,
}

/// DELETE /moderation/moderators (204)
pub async fn remove_moderator(
    client: &HelixClient,
    req: &RemoveModeratorRequest,
) -> HelixResult<()> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("user_id", req.user_id.clone()),
    ];
    client
        .delete_no_content("moderation/moderators", &query)
        .await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBlockedTermsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockedTerm {
    pub id: String,
    pub text: String,
}

/// GET /moderation/blocked_terms
pub async fn get_blocked_terms(
    client: &HelixClient,
    req: &GetBlockedTermsRequest,
) -> HelixResult<DataEnvelope<BlockedTerm>> {
    let mut query = vec![
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("moderation/blocked_terms", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddBlockedTermRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "Term to block (2-500 chars)")]
    pub text: String,
}

/// POST /moderation/blocked_terms
pub async fn add_blocked_term(
    client: &HelixClient,
    req: &AddBlockedTermRequest,
) -> HelixResult<BlockedTerm> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let body = json!({ "text": req.text });
    let envelope: DataEnvelope<BlockedTerm> = client
        .post("moderation/blocked_terms", &query, Some(body))
        .await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetShieldModeStatusRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShieldModeStatus {
    pub is_active: bool,
    #[serde(default)]
    pub last_activated_at: Option<String>,
}

/// GET /moderation/shield_mode
pub async fn get_shield_mode_status(
    client: &HelixClient,
    req: &GetShieldModeStatusRequest,
) -> HelixResult<ShieldModeStatus> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let envelope: DataEnvelope<ShieldModeStatus> =
        client.get("moderation/shield_mode", &query).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateShieldModeStatusRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "True to enable, false to disable")]
    pub is_active: bool,
}

/// PUT /moderation/shield_mode
pub async fn update_shield_mode_status(
    client: &HelixClient,
    req: &UpdateShieldModeStatusRequest,
) -> HelixResult<ShieldModeStatus> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let body = json!({ "is_active": req.is_active });
    let envelope: DataEnvelope<ShieldModeStatus> = client
        .put("moderation/shield_mode", &query, Some(body))
        .await?;
    envelope.into_first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ban_request_permanent_by_default() {
        let req: BanUserRequest = serde_json::from_str(
            r#"{"broadcaster_id": "1", "moderator_id": "2", "user_id": "3"}"#,
        )
        .unwrap();
        assert!(req.duration.is_none());
        assert!(req.reason.is_none());
    }

    #[test]
    fn test_banned_user_permanent_has_empty_expiry() {
        let banned: BannedUser = serde_json::from_str(
            r#"{"user_id": "3", "user_login": "troll", "user_name": "Troll", "expires_at": "", "reason": "spam"}"#,
        )
        .unwrap();
        assert!(banned.expires_at.is_empty());
        assert_eq!(banned.reason, "spam");
    }
}
