//! Chat tools: messages, chatters, announcements, shoutouts, settings,
//! and emotes.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::{lines_or, text};
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::chat::{
    self, GetChatSettingsRequest, GetChattersRequest, GetEmotesRequest, SendAnnouncementRequest,
    SendChatMessageRequest, ShoutoutRequest, UpdateChatSettingsRequest,
};

/// Chat capability module.
pub struct ChatTools;

impl ChatTools {
    pub const SEND_CHAT_MESSAGE: &'static str = "twitch_send_chat_message";
    pub const GET_CHATTERS: &'static str = "twitch_get_chatters";
    pub const SEND_ANNOUNCEMENT: &'static str = "twitch_send_announcement";
    pub const SEND_SHOUTOUT: &'static str = "twitch_send_shoutout";
    pub const GET_CHAT_SETTINGS: &'static str = "twitch_get_chat_settings";
    pub const UPDATE_CHAT_SETTINGS: &'static str = "twitch_update_chat_settings";
    pub const GET_CHANNEL_EMOTES: &'static str = "twitch_get_channel_emotes";
}

impl CapabilityModule for ChatTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<SendChatMessageRequest>(
                Self::SEND_CHAT_MESSAGE,
                "Send a message to a broadcaster's chat",
            ),
            tool::<GetChattersRequest>(
                Self::GET_CHATTERS,
                "Get list of users in a broadcaster's chat",
            ),
            tool::<SendAnnouncementRequest>(
                Self::SEND_ANNOUNCEMENT,
                "Send an announcement message to the chat",
            ),
            tool::<ShoutoutRequest>(Self::SEND_SHOUTOUT, "Send a shoutout to another broadcaster"),
            tool::<GetChatSettingsRequest>(
                Self::GET_CHAT_SETTINGS,
                "Get chat settings for a channel",
            ),
            tool::<UpdateChatSettingsRequest>(
                Self::UPDATE_CHAT_SETTINGS,
                "Update chat settings for a channel",
            ),
            tool::<GetEmotesRequest>(Self::GET_CHANNEL_EMOTES, "Get custom emotes for a channel"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::SEND_CHAT_MESSAGE.to_string(), handler(send_chat_message)),
            (Self::GET_CHATTERS.to_string(), handler(get_chatters)),
            (Self::SEND_ANNOUNCEMENT.to_string(), handler(send_announcement)),
            (Self::SEND_SHOUTOUT.to_string(), handler(send_shoutout)),
            (Self::GET_CHAT_SETTINGS.to_string(), handler(get_chat_settings)),
            (
                Self::UPDATE_CHAT_SETTINGS.to_string(),
                handler(update_chat_settings),
            ),
            (Self::GET_CHANNEL_EMOTES.to_string(), handler(get_channel_emotes)),
        ])
    }
}

async fn send_chat_message(
    client: Arc<HelixClient>,
    req: SendChatMessageRequest,
) -> HandlerOutput {
    let sent = chat::send_chat_message(&client, &req).await?;
    let message = if sent.is_sent {
        format!("Message sent: {}", sent.message_id)
    } else {
        match sent.drop_reason {
            Some(reason) => format!("Message dropped: {}", reason.message),
            None => "Message dropped".to_string(),
        }
    };
    Ok(text(message))
}

async fn get_chatters(client: Arc<HelixClient>, req: GetChattersRequest) -> HandlerOutput {
    let result = chat::get_chatters(&client, &req).await?;
    let total = result.total.unwrap_or(result.data.len() as u64);
    let chatters: Vec<String> = result
        .data
        .iter()
        .take(50)
        .map(|c| format!("{} ({})", c.user_name, c.user_id))
        .collect();
    Ok(lines_or(
        &format!("Chatters ({}):", total),
        chatters,
        "No chatters",
    ))
}

async fn send_announcement(
    client: Arc<HelixClient>,
    req: SendAnnouncementRequest,
) -> HandlerOutput {
    chat::send_chat_announcement(&client, &req).await?;
    Ok(text("Announcement sent successfully"))
}

async fn send_shoutout(client: Arc<HelixClient>, req: ShoutoutRequest) -> HandlerOutput {
    chat::send_shoutout(&client, &req).await?;
    Ok(text("Shoutout sent successfully"))
}

fn format_settings(settings: &chat::ChatSettings) -> String {
    let follower_mode = match (settings.follower_mode, settings.follower_mode_duration) {
        (true, Some(minutes)) => format!("on ({} min)", minutes),
        (true, None) => "on".to_string(),
        (false, _) => "off".to_string(),
    };
    let slow_mode = match (settings.slow_mode, settings.slow_mode_wait_time) {
        (true, Some(seconds)) => format!("on ({}s)", seconds),
        (true, None) => "on".to_string(),
        (false, _) => "off".to_string(),
    };
    format!(
        "Chat settings for {}:\n\
         - Emote-only mode: {}\n\
         - Follower-only mode: {}\n\
         - Slow mode: {}\n\
         - Subscriber-only mode: {}\n\
         - Unique chat mode: {}",
        settings.broadcaster_id,
        if settings.emote_mode { "on" } else { "off" },
        follower_mode,
        slow_mode,
        if settings.subscriber_mode { "on" } else { "off" },
        if settings.unique_chat_mode { "on" } else { "off" },
    )
}

async fn get_chat_settings(client: Arc<HelixClient>, req: GetChatSettingsRequest) -> HandlerOutput {
    let settings = chat::get_chat_settings(&client, &req).await?;
    Ok(text(format_settings(&settings)))
}

async fn update_chat_settings(
    client: Arc<HelixClient>,
    req: UpdateChatSettingsRequest,
) -> HandlerOutput {
    let settings = chat::update_chat_settings(&client, &req).await?;
    Ok(text(format!("Settings updated\n{}", format_settings(&settings))))
}

async fn get_channel_emotes(client: Arc<HelixClient>, req: GetEmotesRequest) -> HandlerOutput {
    let result = chat::get_channel_emotes(&client, &req).await?;
    let emotes: Vec<String> = result
        .data
        .iter()
        .map(|e| format!("{} ({})", e.name, e.id))
        .collect();
    Ok(lines_or("Emotes:", emotes, "No custom emotes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = ChatTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 7);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }

    #[test]
    fn test_send_message_schema_requires_core_fields() {
        let module = ChatTools;
        let descriptors = module.describe();
        let send = descriptors
            .iter()
            .find(|t| t.name == ChatTools::SEND_CHAT_MESSAGE)
            .unwrap();
        let schema = serde_json::to_value(send.input_schema.as_ref()).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "broadcaster_id"));
        assert!(required.iter().any(|v| v == "sender_id"));
        assert!(required.iter().any(|v| v == "message"));
        assert!(!required.iter().any(|v| v == "reply_parent_message_id"));
    }

    #[test]
    fn test_format_settings() {
        let settings = chat::ChatSettings {
            broadcaster_id: "1".to_string(),
            emote_mode: false,
            follower_mode: true,
            follower_mode_duration: Some(10),
            slow_mode: false,
            slow_mode_wait_time: None,
            subscriber_mode: false,
            unique_chat_mode: true,
        };
        let formatted = format_settings(&settings);
        assert!(formatted.contains("Follower-only mode: on (10 min)"));
        assert!(formatted.contains("Slow mode: off"));
        assert!(formatted.contains("Unique chat mode: on"));
    }
}
