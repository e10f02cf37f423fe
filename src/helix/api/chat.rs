//! Chat endpoints: messages, chatters, announcements, shoutouts, settings,
//! and channel emotes.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendChatMessageRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The sender's user ID")]
    pub sender_id: String,
    #[schemars(description = "The message to send")]
    pub message: String,
    #[schemars(description = "Message ID to reply to (optional)")]
    pub reply_parent_message_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    pub message_id: String,
    pub is_sent: bool,
    #[serde(default)]
    pub drop_reason: Option<DropReason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropReason {
    pub code: String,
    pub message: String,
}

/// POST /chat/messages
pub async fn send_chat_message(
    client: &HelixClient,
    req: &SendChatMessageRequest,
) -> HelixResult<SentMessage> {
    let mut body = json!({
        "broadcaster_id": req.broadcaster_id,
        "sender_id": req.sender_id,
        "message": req.message,
    });
    if let Some(reply) = &req.reply_parent_message_id {
        body["reply_parent_message_id"] = Value::String(reply.clone());
    }
    let envelope: DataEnvelope<SentMessage> =
        client.post("chat/messages", &[], Some(body)).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetChattersRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "Max number of results (max 1000)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chatter {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}

/// GET /chat/chatters
pub async fn get_chatters(
    client: &HelixClient,
    req: &GetChattersRequest,
) -> HelixResult<DataEnvelope<Chatter>> {
    let mut query = vec![
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("chat/chatters", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendAnnouncementRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "The announcement message")]
    pub message: String,
    #[schemars(description = "Color: blue, green, orange, purple, primary")]
    pub color: Option<String>,
}

/// POST /chat/announcements (204)
pub async fn send_chat_announcement(
    client: &HelixClient,
    req: &SendAnnouncementRequest,
) -> HelixResult<()> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let mut body = json!({ "message": req.message });
    if let Some(color) = &req.color {
        body["color"] = Value::String(color.clone());
    }
    client
        .post_no_content("chat/announcements", &query, Some(body))
        .await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ShoutoutRequest {
    #[schemars(description = "Your broadcaster ID")]
    pub from_broadcaster_id: String,
    #[schemars(description = "Broadcaster to shoutout")]
    pub to_broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
}

/// POST /chat/shoutouts (204)
pub async fn send_shoutout(client: &HelixClient, req: &ShoutoutRequest) -> HelixResult<()> {
    let query = [
        ("from_broadcaster_id", req.from_broadcaster_id.clone()),
        ("to_broadcaster_id", req.to_broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    client.post_no_content("chat/shoutouts", &query, None).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetChatSettingsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub broadcaster_id: String,
    pub emote_mode: bool,
    pub follower_mode: bool,
    #[serde(default)]
    pub follower_mode_duration: Option<u64>,
    pub slow_mode: bool,
    #[serde(default)]
    pub slow_mode_wait_time: Option<u64>,
    pub subscriber_mode: bool,
    pub unique_chat_mode: bool,
}

/// GET /chat/settings
pub async fn get_chat_settings(
    client: &HelixClient,
    req: &GetChatSettingsRequest,
) -> HelixResult<ChatSettings> {
    let query = [("broadcaster_id", req.broadcaster_id.clone())];
    let envelope: DataEnvelope<ChatSettings> = client.get("chat/settings", &query).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateChatSettingsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The moderator's user ID")]
    pub moderator_id: String,
    #[schemars(description = "Enable emote-only mode")]
    pub emote_mode: Option<bool>,
    #[schemars(description = "Enable follower-only mode")]
    pub follower_mode: Option<bool>,
    #[schemars(description = "Minutes user must follow before chatting")]
    pub follower_mode_duration: Option<u64>,
    #[schemars(description = "Enable slow mode")]
    pub slow_mode: Option<bool>,
    #[schemars(description = "Seconds between messages")]
    pub slow_mode_wait_time: Option<u64>,
    #[schemars(description = "Enable subscriber-only mode")]
    pub subscriber_mode: Option<bool>,
    #[schemars(description = "Enable unique messages only")]
    pub unique_chat_mode: Option<bool>,
}

/// PATCH /chat/settings
pub async fn update_chat_settings(
    client: &HelixClient,
    req: &UpdateChatSettingsRequest,
) -> HelixResult<ChatSettings> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("moderator_id", req.moderator_id.clone()),
    ];
    let mut body = serde_json::Map::new();
    let mut set = |key: &str, value: Option<Value>| {
        if let Some(value) = value {
            body.insert(key.to_string(), value);
        }
    };
    set("emote_mode", req.emote_mode.map(Value::from));
    set("follower_mode", req.follower_mode.map(Value::from));
    set(
        "follower_mode_duration",
        req.follower_mode_duration.map(Value::from),
    );
    set("slow_mode", req.slow_mode.map(Value::from));
    set(
        "slow_mode_wait_time",
        req.slow_mode_wait_time.map(Value::from),
    );
    set("subscriber_mode", req.subscriber_mode.map(Value::from));
    set("unique_chat_mode", req.unique_chat_mode.map(Value::from));

    let envelope: DataEnvelope<ChatSettings> = client
        .patch("chat/settings", &query, Value::Object(body))
        .await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetEmotesRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Emote {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emote_type: Option<String>,
}

/// GET /chat/emotes
pub async fn get_channel_emotes(
    client: &HelixClient,
    req: &GetEmotesRequest,
) -> HelixResult<DataEnvelope<Emote>> {
    let query = [("broadcaster_id", req.broadcaster_id.clone())];
    client.get("chat/emotes", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_request_optional_reply() {
        let req: SendChatMessageRequest = serde_json::from_str(
            r#"{"broadcaster_id": "1", "sender_id": "2", "message": "hi"}"#,
        )
        .unwrap();
        assert!(req.reply_parent_message_id.is_none());
    }

    #[test]
    fn test_send_message_request_missing_field() {
        let result: Result<SendChatMessageRequest, _> =
            serde_json::from_str(r#"{"broadcaster_id": "1", "sender_id": "2"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("message"));
    }

    #[test]
    fn test_chat_settings_decode() {
        let settings: ChatSettings = serde_json::from_str(
            r#"{
                "broadcaster_id": "1",
                "emote_mode": false,
                "follower_mode": true,
                "follower_mode_duration": 15,
                "slow_mode": false,
                "slow_mode_wait_time": null,
                "subscriber_mode": false,
                "unique_chat_mode": false
            }"#,
        )
        .unwrap();
        assert!(settings.follower_mode);
        assert_eq!(settings.follower_mode_duration, Some(15));
        assert!(settings.slow_mode_wait_time.is_none());
    }
}
