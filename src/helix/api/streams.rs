//! Stream endpoints: live stream queries and stream markers.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetStreamsRequest {
    #[schemars(description = "Filter by user IDs")]
    pub user_id: Option<Vec<String>>,
    #[schemars(description = "Filter by user login names")]
    pub user_login: Option<Vec<String>>,
    #[schemars(description = "Filter by game ID")]
    pub game_id: Option<String>,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stream {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub game_name: String,
    pub title: String,
    pub viewer_count: u64,
    pub started_at: String,
}

/// GET /streams
pub async fn get_streams(
    client: &HelixClient,
    req: &GetStreamsRequest,
) -> HelixResult<DataEnvelope<Stream>> {
    let mut query = Vec::new();
    for user_id in req.user_id.iter().flatten() {
        query.push(("user_id", user_id.clone()));
    }
    for login in req.user_login.iter().flatten() {
        query.push(("user_login", login.clone()));
    }
    if let Some(game_id) = &req.game_id {
        query.push(("game_id", game_id.clone()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("streams", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetFollowedStreamsRequest {
    #[schemars(description = "The user ID whose followed channels to check")]
    pub user_id: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

/// GET /streams/followed
pub async fn get_followed_streams(
    client: &HelixClient,
    req: &GetFollowedStreamsRequest,
) -> HelixResult<DataEnvelope<Stream>> {
    let mut query = vec![("user_id", req.user_id.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("streams/followed", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateStreamMarkerRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub user_id: String,
    #[schemars(description = "Short description of the marker (max 140 chars)")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamMarker {
    pub id: String,
    pub created_at: String,
    pub position_seconds: u64,
    #[serde(default)]
    pub description: String,
}

/// POST /streams/markers
pub async fn create_stream_marker(
    client: &HelixClient,
    req: &CreateStreamMarkerRequest,
) -> HelixResult<StreamMarker> {
    let mut body = json!({ "user_id": req.user_id });
    if let Some(description) = &req.description {
        body["description"] = Value::String(description.clone());
    }
    let envelope: DataEnvelope<StreamMarker> =
        client.post("streams/markers", &[], Some(body)).await?;
    envelope.into_first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_decode() {
        let stream: Stream = serde_json::from_str(
            r#"{
                "id": "s1",
                "user_id": "1",
                "user_name": "Streamer",
                "game_name": "Tetris",
                "title": "chill run",
                "viewer_count": 321,
                "started_at": "2024-05-01T18:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(stream.viewer_count, 321);
    }
}
