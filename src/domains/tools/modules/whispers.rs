//! Whisper tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::whispers::{self, SendWhisperRequest};

/// Whispers capability module.
pub struct WhispersTools;

impl WhispersTools {
    pub const SEND_WHISPER: &'static str = "twitch_send_whisper";
}

impl CapabilityModule for WhispersTools {
    fn describe(&self) -> Vec<Tool> {
        vec![tool::<SendWhisperRequest>(
            Self::SEND_WHISPER,
            "Send a whisper (private message) to another user",
        )]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([(Self::SEND_WHISPER.to_string(), handler(send_whisper))])
    }
}

async fn send_whisper(client: Arc<HelixClient>, req: SendWhisperRequest) -> HandlerOutput {
    whispers::send_whisper(&client, &req).await?;
    Ok(text("Whisper sent"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = WhispersTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
