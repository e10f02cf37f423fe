//! Video endpoints.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetVideosRequest {
    #[schemars(description = "Video IDs")]
    pub id: Option<Vec<String>>,
    #[schemars(description = "User ID to get videos for")]
    pub user_id: Option<String>,
    #[schemars(description = "Game ID to get videos for")]
    pub game_id: Option<String>,
    #[schemars(description = "Filter: all, archive, highlight, upload")]
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[schemars(description = "Sort: time, trending, views")]
    pub sort: Option<String>,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub user_name: String,
    pub url: String,
    pub view_count: u64,
    #[serde(default)]
    pub duration: String,
}

/// GET /videos
pub async fn get_videos(
    client: &HelixClient,
    req: &GetVideosRequest,
) -> HelixResult<DataEnvelope<Video>> {
    let mut query = Vec::new();
    for id in req.id.iter().flatten() {
        query.push(("id", id.clone()));
    }
    if let Some(user_id) = &req.user_id {
        query.push(("user_id", user_id.clone()));
    }
    if let Some(game_id) = &req.game_id {
        query.push(("game_id", game_id.clone()));
    }
    if let Some(kind) = &req.kind {
        query.push(("type", kind.clone()));
    }
    if let Some(sort) = &req.sort {
        query.push(("sort", sort.clone()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("videos", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteVideosRequest {
    #[schemars(description = "Video IDs to delete (max 5)")]
    pub id: Vec<String>,
}

/// DELETE /videos, returning the IDs that were actually deleted.
pub async fn delete_videos(
    client: &HelixClient,
    req: &DeleteVideosRequest,
) -> HelixResult<Vec<String>> {
    let query: Vec<(&str, String)> = req.id.iter().map(|id| ("id", id.clone())).collect();
    let envelope: DataEnvelope<String> = client.delete("videos", &query).await?;
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_videos_type_alias() {
        let req: GetVideosRequest = serde_json::from_str(r#"{"type": "highlight"}"#).unwrap();
        assert_eq!(req.kind.as_deref(), Some("highlight"));
    }
}
