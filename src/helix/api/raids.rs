//! Raid endpoints.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StartRaidRequest {
    #[schemars(description = "Your broadcaster ID")]
    pub from_broadcaster_id: String,
    #[schemars(description = "Channel to raid")]
    pub to_broadcaster_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Raid {
    pub created_at: String,
    pub is_mature: bool,
}

/// POST /raids
pub async fn start_raid(client: &HelixClient, req: &StartRaidRequest) -> HelixResult<Raid> {
    let query = [
        ("from_broadcaster_id", req.from_broadcaster_id.clone()),
        ("to_broadcaster_id", req.to_broadcaster_id.clone()),
    ];
    let envelope: DataEnvelope<Raid> = client.post("raids", &query, None).await?;
    envelope.into_first()
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CancelRaidRequest {
    #[schemars(description = "Your broadcaster ID")]
    pub broadcaster_id: String,
}

/// DELETE /raids (204)
pub async fn cancel_raid(client: &HelixClient, req: &CancelRaidRequest) -> HelixResult<()> {
    let query = [("broadcaster_id", req.broadcaster_id.clone())];
    client.delete_no_content("raids", &query).await
}
