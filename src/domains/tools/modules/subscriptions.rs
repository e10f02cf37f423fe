//! Subscription tools.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;

use super::common::text;
use crate::domains::tools::module::{CapabilityModule, Handler, HandlerOutput, handler, tool};
use crate::helix::HelixClient;
use crate::helix::api::subscriptions::{
    self, CheckUserSubscriptionRequest, GetBroadcasterSubscriptionsRequest,
};

/// Subscriptions capability module.
pub struct SubscriptionsTools;

impl SubscriptionsTools {
    pub const GET_BROADCASTER_SUBSCRIPTIONS: &'static str = "twitch_get_broadcaster_subscriptions";
    pub const CHECK_USER_SUBSCRIPTION: &'static str = "twitch_check_user_subscription";
}

impl CapabilityModule for SubscriptionsTools {
    fn describe(&self) -> Vec<Tool> {
        vec![
            tool::<GetBroadcasterSubscriptionsRequest>(
                Self::GET_BROADCASTER_SUBSCRIPTIONS,
                "Get list of subscribers for a broadcaster",
            ),
            tool::<CheckUserSubscriptionRequest>(
                Self::CHECK_USER_SUBSCRIPTION,
                "Check if a user is subscribed to a broadcaster",
            ),
        ]
    }

    fn handlers(&self) -> HashMap<String, Handler> {
        HashMap::from([
            (
                Self::GET_BROADCASTER_SUBSCRIPTIONS.to_string(),
                handler(get_broadcaster_subscriptions),
            ),
            (
                Self::CHECK_USER_SUBSCRIPTION.to_string(),
                handler(check_user_subscription),
            ),
        ])
    }
}

async fn get_broadcaster_subscriptions(
    client: Arc<HelixClient>,
    req: GetBroadcasterSubscriptionsRequest,
) -> HandlerOutput {
    let result = subscriptions::get_broadcaster_subscriptions(&client, &req).await?;
    let total = result.total.unwrap_or(result.data.len() as u64);
    let points = result.points.unwrap_or(0);
    let subs: Vec<String> = result
        .data
        .iter()
        .take(50)
        .map(|s| {
            let gift = if s.is_gift { " [Gift]" } else { "" };
            format!("- {} (Tier {}){}", s.user_name, s.tier, gift)
        })
        .collect();
    if subs.is_empty() {
        return Ok(text("No subscribers"));
    }
    Ok(text(format!(
        "Subscribers ({}, {} points):\n{}",
        total,
        points,
        subs.join("\n")
    )))
}

/// "Not subscribed" is an absent result from the API, not a failure.
async fn check_user_subscription(
    client: Arc<HelixClient>,
    req: CheckUserSubscriptionRequest,
) -> HandlerOutput {
    match subscriptions::check_user_subscription(&client, &req).await? {
        Some(sub) => {
            let gift = if sub.is_gift { " (Gift)" } else { "" };
            Ok(text(format!("User is subscribed at Tier {}{}", sub.tier, gift)))
        }
        None => Ok(text("User is not subscribed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_and_handlers_agree() {
        let module = SubscriptionsTools;
        let descriptors = module.describe();
        let handlers = module.handlers();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors.len(), handlers.len());
        for descriptor in &descriptors {
            assert!(handlers.contains_key(descriptor.name.as_ref()));
        }
    }
}
