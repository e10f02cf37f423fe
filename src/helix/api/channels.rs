//! Channel endpoints: channel information, followers, and VIPs.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetChannelInfoRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelInfo {
    pub broadcaster_id: String,
    pub broadcaster_name: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub game_id: String,
    pub title: String,
    #[serde(default)]
    pub broadcaster_language: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// GET /channels
pub async fn get_channel_info(
    client: &HelixClient,
    req: &GetChannelInfoRequest,
) -> HelixResult<ChannelInfo> {
    let query = [("broadcaster_id", req.broadcaster_id.clone())];
    let envelope: DataEnvelope<ChannelInfo> = client.get("channels", &query).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ModifyChannelInfoRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "New stream title")]
    pub title: Option<String>,
    #[schemars(description = "New game/category ID")]
    pub game_id: Option<String>,
    #[schemars(description = "New broadcaster language (ISO 639-1)")]
    pub broadcaster_language: Option<String>,
    #[schemars(description = "New channel tags (max 10)")]
    pub tags: Option<Vec<String>>,
}

/// PATCH /channels (204)
pub async fn modify_channel_info(
    client: &HelixClient,
    req: &ModifyChannelInfoRequest,
) -> HelixResult<()> {
    let query = [("broadcaster_id", req.broadcaster_id.clone())];
    let mut body = serde_json::Map::new();
    if let Some(title) = &req.title {
        body.insert("title".to_string(), Value::String(title.clone()));
    }
    if let Some(game_id) = &req.game_id {
        body.insert("game_id".to_string(), Value::String(game_id.clone()));
    }
    if let Some(language) = &req.broadcaster_language {
        body.insert(
            "broadcaster_language".to_string(),
            Value::String(language.clone()),
        );
    }
    if let Some(tags) = &req.tags {
        body.insert(
            "tags".to_string(),
            Value::Array(tags.iter().cloned().map(Value::String).collect()),
        );
    }
    client
        .patch_no_content("channels", &query, Value::Object(body))
        .await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetChannelFollowersRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Follower {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub followed_at: String,
}

/// GET /channels/followers
pub async fn get_channel_followers(
    client: &HelixClient,
    req: &GetChannelFollowersRequest,
) -> HelixResult<DataEnvelope<Follower>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("channels/followers", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetVipsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vip {
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
}

/// GET /channels/vips
pub async fn get_vips(
    client: &HelixClient,
    req: &GetVipsRequest,
) -> HelixResult<DataEnvelope<Vip>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("channels/vips", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_info_decode_defaults() {
        let info: ChannelInfo = serde_json::from_str(
            r#"{"broadcaster_id": "1", "broadcaster_name": "Streamer", "title": "hi"}"#,
        )
        .unwrap();
        assert!(info.game_name.is_empty());
        assert!(info.tags.is_empty());
    }
}
