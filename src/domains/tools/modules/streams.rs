//! Stream tools: live stream queries and stream markers.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{Content, Tool};

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::streams::{
    self, CreateStreamMarkerRequest, GetFollowedStreamsRequest, GetStreamsRequest, Stream,
};

/// Streams capability module.
pub struct StreamsTools;

impl StreamsTools {
    pub const GET_STREAMS: &'static str = "twitch_get_streams";
    pub const GET_FOLLOWED_STREAMS: &'static str = "twitch_get_followed_streams";
    pub const CREATE_STREAM_MARKER: &'static str = "twitch_create_stream_marker";
}

impl CapabilityModule for StreamsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<GetStreamsRequest>(
                Self::GET_STREAMS,
                "Get live streams, optionally filtered by user or game",
            ),
            tool::<GetFollowedStreamsRequest>(
                Self::GET_FOLLOWED_STREAMS,
                "Get live streams from channels the user follows",
            ),
            tool::<CreateStreamMarkerRequest>(
                Self::CREATE_STREAM_MARKER,
                "Create a marker at the current point of a live stream",
            ),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::GET_STREAMS.to_string(), handler(get_streams)),
            (
                Self::GET_FOLLOWED_STREAMS.to_string(),
                handler(get_followed_streams),
            ),
            (
                Self::CREATE_STREAM_MARKER.to_string(),
                handler(create_stream_marker),
            ),
        ])
    }
}

fn format_streams(data: &[Stream]) -> Vec<Content> {
    if data.is_empty() {
        return text("No live streams found");
    }
    let formatted: Vec<String> = data
        .iter()
        .map(|s| {
            format!(
                "- {} playing {}\n  {} | {} viewers | live since {}",
                s.user_name, s.game_name, s.title, s.viewer_count, s.started_at
            )
        })
        .collect();
    text(formatted.join("\n"))
}

async fn get_streams(client: Arc<HelixClient>, req: GetStreamsRequest) -> HandlerOutput {
    let result = streams::get_streams(&client, &req).await?;
    Ok(format_streams(&result.data))
}

async fn get_followed_streams(
    client: Arc<HelixClient>,
    req: GetFollowedStreamsRequest,
) -> HandlerOutput {
    let result = streams::get_followed_streams(&client, &req).await?;
    Ok(format_streams(&result.data))
}

async fn create_stream_marker(
    client: Arc<HelixClient>,
    req: CreateStreamMarkerRequest,
) -> HandlerOutput {
    let marker = streams::create_stream_marker(&client, &req).await?;
    Ok(text(format!(
        "Marker created at {}s (ID: {})",
        marker.position_seconds, marker.id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = StreamsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }

    #[test]
    fn test_format_streams_empty() {
        let content = format_streams(&[]);
        match &content[0].raw {
            RawContent::Text(t) => assert_eq!(t.text, "No live streams found"),
            other => panic!("expected text, got {:?}", other),
        }
    }
}
