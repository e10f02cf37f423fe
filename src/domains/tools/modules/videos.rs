//! Video tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::videos::{self, DeleteVideosRequest, GetVideosRequest};

/// Videos capability module.
pub struct VideosTools;

impl VideosTools {
    pub const GET_VIDEOS: &'static str = "twitch_get_videos";
    pub const DELETE_VIDEOS: &'static str = "twitch_delete_videos";
}

impl CapabilityModule for VideosTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<GetVideosRequest>(Self::GET_VIDEOS, "Get videos by ID, user, or game"),
            tool::<DeleteVideosRequest>(Self::DELETE_VIDEOS, "Delete videos (max 5 at once)"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::GET_VIDEOS.to_string(), handler(get_videos)),
            (Self::DELETE_VIDEOS.to_string(), handler(delete_videos)),
        ])
    }
}

async fn get_videos(client: Arc<HelixClient>, req: GetVideosRequest) -> HandlerOutput {
    let result = videos::get_videos(&client, &req).await?;
    if result.data.is_empty() {
        return Ok(text("No videos found"));
    }
    let formatted: Vec<String> = result
        .data
        .iter()
        .map(|v| {
            format!(
                "- {}\n  By: {} | Views: {} | Duration: {}\n  URL: {}",
                v.title, v.user_name, v.view_count, v.duration, v.url
            )
        })
        .collect();
    Ok(text(formatted.join("\n")))
}

async fn delete_videos(client: Arc<HelixClient>, req: DeleteVideosRequest) -> HandlerOutput {
    let deleted = videos::delete_videos(&client, &req).await?;
    Ok(text(format!("Deleted videos: {}", deleted.join(", "))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = VideosTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
