//! Bits endpoints: leaderboard and cheermotes.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetBitsLeaderboardRequest {
    #[schemars(description = "Number of entries (max 100)")]
    pub count: Option<u32>,
    #[schemars(description = "Time period: day, week, month, year, all")]
    pub period: Option<String>,
    #[schemars(description = "Get rank for specific user")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub user_name: String,
    pub rank: u32,
    pub score: u64,
}

/// GET /bits/leaderboard
pub async fn get_bits_leaderboard(
    client: &HelixClient,
    req: &GetBitsLeaderboardRequest,
) -> HelixResult<DataEnvelope<LeaderboardEntry>> {
    let mut query = Vec::new();
    if let Some(count) = req.count {
        query.push(("count", count.to_string()));
    }
    if let Some(period) = &req.period {
        query.push(("period", period.clone()));
    }
    if let Some(user_id) = &req.user_id {
        query.push(("user_id", user_id.clone()));
    }
    client.get("bits/leaderboard", &query).await
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetCheermotesRequest {
    #[schemars(description = "Broadcaster ID (omit for global)")]
    pub broadcaster_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cheermote {
    pub prefix: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// GET /bits/cheermotes
pub async fn get_cheermotes(
    client: &HelixClient,
    req: &GetCheermotesRequest,
) -> HelixResult<DataEnvelope<Cheermote>> {
    let mut query = Vec::new();
    if let Some(broadcaster_id) = &req.broadcaster_id {
        query.push(("broadcaster_id", broadcaster_id.clone()));
    }
    client.get("bits/cheermotes", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cheermote_renamed_type_field() {
        let cheermote: Cheermote =
            serde_json::from_str(r#"{"prefix": "Cheer", "type": "global_first_party"}"#).unwrap();
        assert_eq!(cheermote.kind, "global_first_party");
    }
}
