//! Whisper endpoints.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::helix::client::HelixClient;
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SendWhisperRequest {
    #[schemars(description = "Your user ID")]
    pub from_user_id: String,
    #[schemars(description = "Recipient's user ID")]
    pub to_user_id: String,
    #[schemars(description = "Message to send (max 10000 chars)")]
    pub message: String,
}

/// POST /whispers (204)
pub async fn send_whisper(client: &HelixClient, req: &SendWhisperRequest) -> HelixResult<()> {
    let query = [
        ("from_user_id", req.from_user_id.clone()),
        ("to_user_id", req.to_user_id.clone()),
    ];
    let body = json!({ "message": req.message });
    client.post_no_content("whispers", &query, Some(body)).await
}
