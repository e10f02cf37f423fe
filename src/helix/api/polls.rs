//! Poll endpoints.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePollRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Poll title (max 60 chars)")]
    pub title: String,
    #[schemars(description = "List of choice titles (2-5 choices, max 25 chars each)")]
    pub choices: Vec<String>,
    #[schemars(description = "Duration in seconds (15-1800)")]
    pub duration: u32,
    #[schemars(description = "Allow channel points voting")]
    pub channel_points_voting_enabled: Option<bool>,
    #[schemars(description = "Channel points cost per vote")]
    pub channel_points_per_vote: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub status: String,
    pub duration: u32,
    pub choices: Vec<PollChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollChoice {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub votes: u64,
}

/// POST /polls
pub async fn create_poll(client: &HelixClient, req: &CreatePollRequest) -> HelixResult<Poll> {
    let choices: Vec<Value> = req.choices.iter().map(|c| json!({ "title": c })).collect();
    let mut body = json!({
        "broadcaster_id": req.broadcaster_id,
        "title": req.title,
        "choices": choices,
        "duration": req.duration,
    });
    if let Some(enabled) = req.channel_points_voting_enabled {
        body["channel_points_voting_enabled"] = Value::from(enabled);
    }
    if let Some(points) = req.channel_points_per_vote {
        body["channel_points_per_vote"] = Value::from(points);
    }
    let envelope: DataEnvelope<Poll> = client.post("polls", &[], Some(body)).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPollsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Specific poll IDs")]
    pub id: Option<Vec<String>>,
    #[schemars(description = "Max results (max 20)")]
    pub first: Option<u32>,
}

/// GET /polls
pub async fn get_polls(
    client: &HelixClient,
    req: &GetPollsRequest,
) -> HelixResult<DataEnvelope<Poll>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    for id in req.id.iter().flatten() {
        query.push(("id", id.clone()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("polls", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EndPollRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The poll ID")]
    pub id: String,
    #[schemars(description = "TERMINATED (show results) or ARCHIVED (hide results)")]
    pub status: String,
}

/// PATCH /polls
pub async fn end_poll(client: &HelixClient, req: &EndPollRequest) -> HelixResult<Poll> {
    let body = json!({
        "broadcaster_id": req.broadcaster_id,
        "id": req.id,
        "status": req.status,
    });
    let envelope: DataEnvelope<Poll> = client.patch("polls", &[], body).await?;
    envelope.into_first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_decode_defaults_votes() {
        let poll: Poll = serde_json::from_str(
            r#"{
                "id": "p1",
                "title": "Best map?",
                "status": "ACTIVE",
                "duration": 120,
                "choices": [{"id": "c1", "title": "Dust"}, {"id": "c2", "title": "Mirage", "votes": 7}]
            }"#,
        )
        .unwrap();
        assert_eq!(poll.choices[0].votes, 0);
        assert_eq!(poll.choices[1].votes, 7);
    }
}
