//! Capability modules, one per Twitch API domain.
//!
//! Each module is self-contained: it declares its tool descriptors and
//! handlers, and nothing else depends on it. The full set is assembled in
//! [`all`], in the order the registry aggregates them.

mod common;

pub mod bits;
pub mod channels;
pub mod chat;
pub mod clips;
pub mod moderation;
pub mod polls;
pub mod predictions;
pub mod raids;
pub mod search;
pub mod streams;
pub mod subscriptions;
pub mod users;
pub mod videos;
pub mod whispers;

pub use bits::BitsTools;
pub use channels::ChannelsTools;
pub use chat::ChatTools;
pub use clips::ClipsTools;
pub use moderation::ModerationTools;
pub use polls::PollsTools;
pub use predictions::PredictionsTools;
pub use raids::RaidsTools;
pub use search::SearchTools;
pub use streams::StreamsTools;
pub use subscriptions::SubscriptionsTools;
pub use users::UsersTools;
pub use videos::VideosTools;
pub use whispers::WhispersTools;

use super::module::CapabilityModule;

/// Every capability module, in registration order.
pub fn all() -> Vec<Box<dyn CapabilityModule>> {
    vec![
        Box::new(BitsTools),
        Box::new(ChannelsTools),
        Box::new(ChatTools),
        Box::new(ClipsTools),
        Box::new(ModerationTools),
        Box::new(PollsTools),
        Box::new(PredictionsTools),
        Box::new(RaidsTools),
        Box::new(SearchTools),
        Box::new(StreamsTools),
        Box::new(SubscriptionsTools),
        Box::new(UsersTools),
        Box::new(VideosTools),
        Box::new(WhispersTools),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domains::tools::registry::ToolRegistry;

    #[test]
    fn test_every_module_has_matching_describe_and_handlers() {
        for module in all() {
            let names: HashSet<String> = module
                .describe()
                .iter()
                .map(|t| t.name.to_string())
                .collect();
            let handler_names: HashSet<String> =
                module.handlers().keys().cloned().collect();
            assert_eq!(names, handler_names);
        }
    }

    #[test]
    fn test_full_registry_has_no_collisions() {
        let registry = ToolRegistry::build(&all());
        assert_eq!(registry.catalog().len(), registry.len());
        assert_eq!(registry.len(), 50);
    }

    #[test]
    fn test_all_tool_names_are_prefixed() {
        let registry = ToolRegistry::build(&all());
        for tool in registry.catalog() {
            assert!(
                tool.name.starts_with("twitch_"),
                "unprefixed tool name: {}",
                tool.name
            );
            assert!(tool.description.is_some());
        }
    }
}
