//! Prediction endpoints.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePredictionRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Prediction title (max 45 chars)")]
    pub title: String,
    #[schemars(description = "List of outcome titles (2-10 outcomes, max 25 chars each)")]
    pub outcomes: Vec<String>,
    #[schemars(description = "Seconds users can make predictions (30-1800)")]
    pub prediction_window: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub title: String,
    pub status: String,
    pub outcomes: Vec<PredictionOutcome>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionOutcome {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub channel_points: u64,
}

/// POST /predictions
pub async fn create_prediction(
    client: &HelixClient,
    req: &CreatePredictionRequest,
) -> HelixResult<Prediction> {
    let outcomes: Vec<Value> = req.outcomes.iter().map(|o| json!({ "title": o })).collect();
    let body = json!({
        "broadcaster_id": req.broadcaster_id,
        "title": req.title,
        "outcomes": outcomes,
        "prediction_window": req.prediction_window,
    });
    let envelope: DataEnvelope<Prediction> = client.post("predictions", &[], Some(body)).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetPredictionsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Specific prediction IDs")]
    pub id: Option<Vec<String>>,
    #[schemars(description = "Max results (max 25)")]
    pub first: Option<u32>,
}

/// GET /predictions
pub async fn get_predictions(
    client: &HelixClient,
    req: &GetPredictionsRequest,
) -> HelixResult<DataEnvelope<Prediction>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    for id in req.id.iter().flatten() {
        query.push(("id", id.clone()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("predictions", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EndPredictionRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The prediction ID")]
    pub id: String,
    #[schemars(description = "RESOLVED, CANCELED, or LOCKED")]
    pub status: String,
    #[schemars(description = "The winning outcome ID (required for RESOLVED)")]
    pub winning_outcome_id: Option<String>,
}

/// PATCH /predictions
pub async fn end_prediction(
    client: &HelixClient,
    req: &EndPredictionRequest,
) -> HelixResult<Prediction> {
    let mut body = json!({
        "broadcaster_id": req.broadcaster_id,
        "id": req.id,
        "status": req.status,
    });
    if let Some(winner) = &req.winning_outcome_id {
        body["winning_outcome_id"] = Value::String(winner.clone());
    }
    let envelope: DataEnvelope<Prediction> = client.patch("predictions", &[], body).await?;
    envelope.into_first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_prediction_winner_optional() {
        let req: EndPredictionRequest = serde_json::from_str(
            r#"{"broadcaster_id": "1", "id": "p1", "status": "CANCELED"}"#,
        )
        .unwrap();
        assert!(req.winning_outcome_id.is_none());
    }
}
