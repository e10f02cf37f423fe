//! Bits tools: leaderboard and cheermotes.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::{lines_or, text};
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::bits::{self, GetBitsLeaderboardRequest, GetCheermotesRequest};

/// Bits capability module.
pub struct BitsTools;

impl BitsTools {
    pub const GET_BITS_LEADERBOARD: &'static str = "twitch_get_bits_leaderboard";
    pub const GET_CHEERMOTES: &'static str = "twitch_get_cheermotes";
}

impl CapabilityModule for BitsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<GetBitsLeaderboardRequest>(
                Self::GET_BITS_LEADERBOARD,
                "Get bits leaderboard for a channel",
            ),
            tool::<GetCheermotesRequest>(
                Self::GET_CHEERMOTES,
                "Get cheermotes for a channel or global",
            ),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (
                Self::GET_BITS_LEADERBOARD.to_string(),
                handler(get_bits_leaderboard),
            ),
            (Self::GET_CHEERMOTES.to_string(), handler(get_cheermotes)),
        ])
    }
}

async fn get_bits_leaderboard(
    client: Arc<HelixClient>,
    req: GetBitsLeaderboardRequest,
) -> HandlerOutput {
    let result = bits::get_bits_leaderboard(&client, &req).await?;
    let total = result.total.unwrap_or(result.data.len() as u64);
    let entries: Vec<String> = result
        .data
        .iter()
        .map(|e| format!("{}. {}: {} bits", e.rank, e.user_name, e.score))
        .collect();
    if entries.is_empty() {
        return Ok(text("Bits leaderboard is empty"));
    }
    Ok(text(format!(
        "Bits Leaderboard (Total: {}):\n{}",
        total,
        entries.join("\n")
    )))
}

async fn get_cheermotes(client: Arc<HelixClient>, req: GetCheermotesRequest) -> HandlerOutput {
    let result = bits::get_cheermotes(&client, &req).await?;
    let cheermotes: Vec<String> = result
        .data
        .iter()
        .map(|c| format!("- {}", c.prefix))
        .collect();
    Ok(lines_or("Cheermotes:", cheermotes, "No cheermotes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = BitsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
