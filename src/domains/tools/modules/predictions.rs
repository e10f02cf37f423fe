//! Prediction tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::predictions::{
    self, CreatePredictionRequest, EndPredictionRequest, GetPredictionsRequest,
};

/// Predictions capability module.
pub struct PredictionsTools;

impl PredictionsTools {
    pub const CREATE_PREDICTION: &'static str = "twitch_create_prediction";
    pub const GET_PREDICTIONS: &'static str = "twitch_get_predictions";
    pub const END_PREDICTION: &'static str = "twitch_end_prediction";
}

impl CapabilityModule for PredictionsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<CreatePredictionRequest>(
                Self::CREATE_PREDICTION,
                "Create a prediction on a channel",
            ),
            tool::<GetPredictionsRequest>(Self::GET_PREDICTIONS, "Get predictions for a channel"),
            tool::<EndPredictionRequest>(Self::END_PREDICTION, "End/resolve a prediction"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::CREATE_PREDICTION.to_string(), handler(create_prediction)),
            (Self::GET_PREDICTIONS.to_string(), handler(get_predictions)),
            (Self::END_PREDICTION.to_string(), handler(end_prediction)),
        ])
    }
}

async fn create_prediction(
    client: Arc<HelixClient>,
    req: CreatePredictionRequest,
) -> HandlerOutput {
    let prediction = predictions::create_prediction(&client, &req).await?;
    let outcomes: Vec<String> = prediction
        .outcomes
        .iter()
        .map(|o| format!("{} ({})", o.title, o.id))
        .collect();
    Ok(text(format!(
        "Prediction created!\nID: {}\nTitle: {}\nOutcomes: {}",
        prediction.id,
        prediction.title,
        outcomes.join(", ")
    )))
}

async fn get_predictions(client: Arc<HelixClient>, req: GetPredictionsRequest) -> HandlerOutput {
    let result = predictions::get_predictions(&client, &req).await?;
    if result.data.is_empty() {
        return Ok(text("No predictions found"));
    }
    let formatted: Vec<String> = result
        .data
        .iter()
        .map(|p| {
            let outcomes: Vec<String> = p
                .outcomes
                .iter()
                .map(|o| format!("    {}: {} points ({} users)", o.title, o.channel_points, o.users))
                .collect();
            format!(
                "- {} ({})\n  Outcomes:\n{}",
                p.title,
                p.status,
                outcomes.join("\n")
            )
        })
        .collect();
    Ok(text(formatted.join("\n")))
}

async fn end_prediction(client: Arc<HelixClient>, req: EndPredictionRequest) -> HandlerOutput {
    let prediction = predictions::end_prediction(&client, &req).await?;
    Ok(text(format!(
        "Prediction ended: {} (Status: {})",
        prediction.title, prediction.status
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = PredictionsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }

    #[test]
    fn test_create_schema_requires_outcomes() {
        let descriptors = PredictionsTools.describe();
        let create = descriptors
            .iter()
            .find(|t| t.name == PredictionsTools::CREATE_PREDICTION)
            .unwrap();
        let schema = serde_json::to_value(create.input_schema.as_ref()).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "outcomes"));
        assert!(required.iter().any(|v| v == "prediction_window"));
    }
}
