//! Raid tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::raids::{self, CancelRaidRequest, StartRaidRequest};

/// Raids capability module.
pub struct RaidsTools;

impl RaidsTools {
    pub const START_RAID: &'static str = "twitch_start_raid";
    pub const CANCEL_RAID: &'static str = "twitch_cancel_raid";
}

impl CapabilityModule for RaidsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<StartRaidRequest>(Self::START_RAID, "Start a raid to another channel"),
            tool::<CancelRaidRequest>(Self::CANCEL_RAID, "Cancel a pending raid"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::START_RAID.to_string(), handler(start_raid)),
            (Self::CANCEL_RAID.to_string(), handler(cancel_raid)),
        ])
    }
}

async fn start_raid(client: Arc<HelixClient>, req: StartRaidRequest) -> HandlerOutput {
    let raid = raids::start_raid(&client, &req).await?;
    Ok(text(format!(
        "Raid started!\nCreated: {}\nMature: {}",
        raid.created_at, raid.is_mature
    )))
}

async fn cancel_raid(client: Arc<HelixClient>, req: CancelRaidRequest) -> HandlerOutput {
    raids::cancel_raid(&client, &req).await?;
    Ok(text("Raid cancelled"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = RaidsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
