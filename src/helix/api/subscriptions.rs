//! Subscription endpoints.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::helix::client::{DataEnvelope, HelixClient};
use crate::helix::error::HelixResult;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetBroadcasterSubscriptionsRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "Filter to specific users")]
    pub user_id: Option<Vec<String>>,
    #[schemars(description = "Max results (max 100)")]
    pub first: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub user_id: String,
    pub user_name: String,
    pub tier: String,
    pub is_gift: bool,
}

/// GET /subscriptions
pub async fn get_broadcaster_subscriptions(
    client: &HelixClient,
    req: &GetBroadcasterSubscriptionsRequest,
) -> HelixResult<DataEnvelope<Subscription>> {
    let mut query = vec![("broadcaster_id", req.broadcaster_id.clone())];
    for user_id in req.user_id.iter().flatten() {
        query.push(("user_id", user_id.clone()));
    }
    if let Some(first) = req.first {
        query.push(("first", first.to_string()));
    }
    client.get("subscriptions", &query).await
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CheckUserSubscriptionRequest {
    #[schemars(description = "The broadcaster's user ID")]
    pub broadcaster_id: String,
    #[schemars(description = "The user ID to check")]
    pub user_id: String,
}

/// GET /subscriptions/user
///
/// Helix answers 404 when the user is not subscribed; that maps to
/// `Ok(None)` here so callers can distinguish "not subscribed" from a real
/// upstream failure.
pub async fn check_user_subscription(
    client: &HelixClient,
    req: &CheckUserSubscriptionRequest,
) -> HelixResult<Option<Subscription>> {
    let query = [
        ("broadcaster_id", req.broadcaster_id.clone()),
        ("user_id", req.user_id.clone()),
    ];
    let envelope: Option<DataEnvelope<Subscription>> =
        client.get_optional("subscriptions/user", &query).await?;
    match envelope {
        Some(envelope) => Ok(envelope.data.into_iter().next()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_decode() {
        let sub: Subscription = serde_json::from_str(
            r#"{"user_id": "3", "user_name": "Fan", "tier": "1000", "is_gift": true}"#,
        )
        .unwrap();
        assert_eq!(sub.tier, "1000");
        assert!(sub.is_gift);
    }
}
