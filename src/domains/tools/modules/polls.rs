//! Poll tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::polls::{
    self, CreatePollRequest, EndPollRequest, GetPollsRequest, Poll,
};

/// Polls capability module.
pub struct PollsTools;

impl PollsTools {
    pub const CREATE_POLL: &'static str = "twitch_create_poll";
    pub const GET_POLLS: &'static str = "twitch_get_polls";
    pub const END_POLL: &'static str = "twitch_end_poll";
}

impl CapabilityModule for PollsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<CreatePollRequest>(Self::CREATE_POLL, "Create a poll on a channel"),
            tool::<GetPollsRequest>(Self::GET_POLLS, "Get polls for a channel"),
            tool::<EndPollRequest>(Self::END_POLL, "End an active poll"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::CREATE_POLL.to_string(), handler(create_poll)),
            (Self::GET_POLLS.to_string(), handler(get_polls)),
            (Self::END_POLL.to_string(), handler(end_poll)),
        ])
    }
}

async fn create_poll(client: Arc<HelixClient>, req: CreatePollRequest) -> HandlerOutput {
    let poll = polls::create_poll(&client, &req).await?;
    Ok(text(format!(
        "Poll created!\nID: {}\nTitle: {}\nDuration: {}s",
        poll.id, poll.title, poll.duration
    )))
}

fn format_poll(poll: &Poll) -> String {
    let choices: Vec<String> = poll
        .choices
        .iter()
        .map(|c| format!("    {}: {} votes", c.title, c.votes))
        .collect();
    format!(
        "- {} ({})\n  Choices:\n{}",
        poll.title,
        poll.status,
        choices.join("\n")
    )
}

async fn get_polls(client: Arc<HelixClient>, req: GetPollsRequest) -> HandlerOutput {
    let result = polls::get_polls(&client, &req).await?;
    if result.data.is_empty() {
        return Ok(text("No polls found"));
    }
    let formatted: Vec<String> = result.data.iter().map(format_poll).collect();
    Ok(text(formatted.join("\n")))
}

async fn end_poll(client: Arc<HelixClient>, req: EndPollRequest) -> HandlerOutput {
    let poll = polls::end_poll(&client, &req).await?;
    Ok(text(format!(
        "Poll ended: {} (Status: {})",
        poll.title, poll.status
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = PollsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 3);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }

    #[test]
    fn test_format_poll_lists_choices() {
        let poll: Poll = serde_json::from_str(
            r#"{
                "id": "p1",
                "title": "Next game?",
                "status": "ACTIVE",
                "duration": 60,
                "choices": [{"id": "c1", "title": "Tetris", "votes": 3}]
            }"#,
        )
        .unwrap();
        let formatted = format_poll(&poll);
        assert!(formatted.contains("Next game? (ACTIVE)"));
        assert!(formatted.contains("Tetris: 3 votes"));
    }
}
