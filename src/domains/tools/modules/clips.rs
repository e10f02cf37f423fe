//! Clip tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::clips::{self, CreateClipRequest, GetClipsRequest};

/// Clips capability module.
pub struct ClipsTools;

impl ClipsTools {
    pub const CREATE_CLIP: &'static str = "twitch_create_clip";
    pub const GET_CLIPS: &'static str = "twitch_get_clips";
}

impl CapabilityModule for ClipsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<CreateClipRequest>(Self::CREATE_CLIP, "Create a clip from a live stream"),
            tool::<GetClipsRequest>(Self::GET_CLIPS, "Get clips for a broadcaster or game"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::CREATE_CLIP.to_string(), handler(create_clip)),
            (Self::GET_CLIPS.to_string(), handler(get_clips)),
        ])
    }
}

async fn create_clip(client: Arc<HelixClient>, req: CreateClipRequest) -> HandlerOutput {
    let clip = clips::create_clip(&client, &req).await?;
    Ok(text(format!(
        "Clip created!\nID: {}\nEdit URL: {}",
        clip.id, clip.edit_url
    )))
}

async fn get_clips(client: Arc<HelixClient>, req: GetClipsRequest) -> HandlerOutput {
    let result = clips::get_clips(&client, &req).await?;
    if result.data.is_empty() {
        return Ok(text("No clips found"));
    }
    let formatted: Vec<String> = result
        .data
        .iter()
        .map(|c| {
            format!(
                "- {}\n  By: {} | Views: {}\n  URL: {}",
                c.title, c.creator_name, c.view_count, c.url
            )
        })
        .collect();
    Ok(text(formatted.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = ClipsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
