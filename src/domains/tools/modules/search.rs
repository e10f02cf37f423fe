//! Search tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::{lines_or, truncate};
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::search::{self, SearchCategoriesRequest, SearchChannelsRequest};

/// Search capability module.
pub struct SearchTools;

impl SearchTools {
    pub const SEARCH_CATEGORIES: &'static str = "twitch_search_categories";
    pub const SEARCH_CHANNELS: &'static str = "twitch_search_channels";
}

impl CapabilityModule for SearchTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<SearchCategoriesRequest>(
                Self::SEARCH_CATEGORIES,
                "Search for game/category names",
            ),
            tool::<SearchChannelsRequest>(Self::SEARCH_CHANNELS, "Search for channels by name"),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (Self::SEARCH_CATEGORIES.to_string(), handler(search_categories)),
            (Self::SEARCH_CHANNELS.to_string(), handler(search_channels)),
        ])
    }
}

async fn search_categories(
    client: Arc<HelixClient>,
    req: SearchCategoriesRequest,
) -> HandlerOutput {
    let result = search::search_categories(&client, &req).await?;
    let categories: Vec<String> = result
        .data
        .iter()
        .map(|c| format!("- {} (ID: {})", c.name, c.id))
        .collect();
    Ok(lines_or("Categories:", categories, "No categories found"))
}

async fn search_channels(client: Arc<HelixClient>, req: SearchChannelsRequest) -> HandlerOutput {
    let result = search::search_channels(&client, &req).await?;
    let channels: Vec<String> = result
        .data
        .iter()
        .map(|ch| {
            let live = if ch.is_live { " [LIVE]" } else { "" };
            format!(
                "- {}{}: {} (ID: {})",
                ch.display_name,
                live,
                truncate(&ch.title, 50),
                ch.id
            )
        })
        .collect();
    Ok(lines_or("Channels:", channels, "No channels found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = SearchTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
