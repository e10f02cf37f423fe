//! Channel tools: channel information, followers, and VIPs.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::{lines_or, text};
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::channels::{
    self, GetChannelFollowersRequest, GetChannelInfoRequest, GetVipsRequest,
    ModifyChannelInfoRequest,
};

/// Channels capability module.
pub struct ChannelsTools;

impl ChannelsTools {
    pub const GET_CHANNEL_INFO: &'static str = "twitch_get_channel_info";
    pub const MODIFY_CHANNEL_INFO: &'static str = "twitch_modify_channel_info";
    pub const GET_CHANNEL_FOLLOWERS: &'static str = "twitch_get_channel_followers";
    pub const GET_VIPS: &'static str = "twitch_get_vips";
}

impl CapabilityModule for ChannelsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<GetChannelInfoRequest>(
                Self::GET_CHANNEL_INFO,
                "Get channel information (title, category, language, tags)",
            ),
            tool::<ModifyChannelInfoRequest>(
                Self::MODIFY_CHANNEL_INFO,
                "Update channel title, category, language, or tags",
            ),
            tool::<GetChannelFollowersRequest>(
                Self::GET_CHANNEL_FOLLOWERS,
                "Get followers of a channel",
            ),
            tool::<GetVipsRequest>(Self::GET_VIPS, "Get VIPs of a channel"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::GET_CHANNEL_INFO.to_string(), handler(get_channel_info)),
            (
                Self::MODIFY_CHANNEL_INFO.to_string(),
                handler(modify_channel_info),
            ),
            (
                Self::GET_CHANNEL_FOLLOWERS.to_string(),
                handler(get_channel_followers),
            ),
            (Self::GET_VIPS.to_string(), handler(get_vips)),
        ])
    }
}

async fn get_channel_info(client: Arc<HelixClient>, req: GetChannelInfoRequest) -> HandlerOutput {
    let info = channels::get_channel_info(&client, &req).await?;
    let game = if info.game_name.is_empty() {
        "none".to_string()
    } else {
        format!("{} ({})", info.game_name, info.game_id)
    };
    let tags = if info.tags.is_empty() {
        "none".to_string()
    } else {
        info.tags.join(", ")
    };
    Ok(text(format!(
        "Channel: {}\nTitle: {}\nCategory: {}\nLanguage: {}\nTags: {}",
        info.broadcaster_name, info.title, game, info.broadcaster_language, tags
    )))
}

async fn modify_channel_info(
    client: Arc<HelixClient>,
    req: ModifyChannelInfoRequest,
) -> HandlerOutput {
    channels::modify_channel_info(&client, &req).await?;
    Ok(text("Channel information updated"))
}

async fn get_channel_followers(
    client: Arc<HelixClient>,
    req: GetChannelFollowersRequest,
) -> HandlerOutput {
    let result = channels::get_channel_followers(&client, &req).await?;
    let total = result.total.unwrap_or(result.data.len() as u64);
    let followers: Vec<String> = result
        .data
        .iter()
        .map(|f| format!("- {} (since {})", f.user_name, f.followed_at))
        .collect();
    Ok(lines_or(
        &format!("Followers ({}):", total),
        followers,
        "No followers",
    ))
}

async fn get_vips(client: Arc<HelixClient>, req: GetVipsRequest) -> HandlerOutput {
    let result = channels::get_vips(&client, &req).await?;
    let vips: Vec<String> = result
        .data
        .iter()
        .map(|v| format!("- {}", v.user_name))
        .collect();
    Ok(lines_or("VIPs:", vips, "No VIPs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = ChannelsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 4);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
