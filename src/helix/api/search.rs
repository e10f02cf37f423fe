//! Search endpoints.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCategoriesRequest {
    #[schemars(description = "Search query")]
    pub query: String,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// GET /search/categories
pub async fn search_categories(
    client: &HelixClient,
    req: &SearchCategoriesRequest,
) -> HelixResult<DataEnvelope<Category>> {
    let mut query = vec![("query", req.query.clone())];
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("search/categories", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchChannelsRequest {
    #[schemars(description = "Search query")]
    pub query: String,
    #[schemars(description = "Only show live channels")]
    pub live_only: Option<bool>,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelResult {
    pub id: String,
    pub display_name: String,
    pub is_live: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub game_name: String,
}

/// GET /search/channels
pub async fn search_channels(
    client: &HelixClient,
    req: &SearchChannelsRequest,
) -> HelixResult<DataEnvelope<ChannelResult>> {
    let mut query = vec![("query", req.query.clone())];
    if let Some(live_only) = req.live_only {
        query.push(("live_only", live_only.to_string()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("search/channels", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_result_decode() {
        let channel: ChannelResult = serde_json::from_str(
            r#"{"id": "1", "display_name": "Streamer", "is_live": true, "title": "speedrun"}"#,
        )
        .unwrap();
        assert!(channel.is_live);
        assert!(channel.game_name.is_empty());
    }
}
