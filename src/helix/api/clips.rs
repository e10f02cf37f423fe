//! Clip endpoints.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateClipRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Add delay for clip processing")]
    pub has_delay: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedClip {
    pub id: String,
    pub edit_url: String,
}

/// POST /clips
pub async fn create_clip(client: &HelixClient, req: &CreateClipRequest) -> HelixResult<CreatedClip> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    if let Some(has_delay) = req.has_delay {
        query.push(("has_delay", has_delay.to_string()));
    }
    let envelope: DataEnvelope<CreatedClip> = client.post("clips", &query, None).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetClipsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: Option<String>,
    #[schemars(description = "The game ID")]
    pub game_id: Option<String>,
    #[schemars(description = "Specific clip IDs")]
    pub id: Option<Vec<String>>,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Clip {
    pub id: String,
    pub url: String,
    pub title: String,
    pub creator_name: String,
    pub view_count: u64,
}

/// GET /clips
pub async fn get_clips(
    client: &HelixClient,
    req: &GetClipsRequest,
) -> HelixResult<DataEnvelope<Clip>> {
    let mut query = Vec::new();
    if let Some(broadcaster_id) = &req.broadcaster_id {
        query.push(("broadcaster_id", broadcaster_id.clone()));
    }
    if let Some(game_id) = &req.game_id {
        query.push(("game_id", game_id.clone()));
    }
    for id in req.id.iter().flatten() {
        query.push(("id", id.clone()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("clips", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_clips_request_all_optional() {
        let req: GetClipsRequest = serde_json::from_str("{}").unwrap();
        assert!(req.broadcaster_id.is_none());
        assert!(req.game_id.is_none());
    }
}
