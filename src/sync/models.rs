use serde::Serialize;

use crate::platform::PushSubscription;

/// Wire envelope the sync endpoint expects:
/// `{"push_subscription": {"endpoint", "p256dh_key", "auth_key"}}`.
#[derive(Serialize)]
pub struct SubscriptionPayload {
    pub push_subscription: SubscriptionParams,
}

#[derive(Serialize)]
pub struct SubscriptionParams {
    pub endpoint: String,
    pub p256dh_key: String,
    pub auth_key: String,
}

impl From<&PushSubscription> for SubscriptionPayload {
    fn from(subscription: &PushSubscription) -> Self {
        Self {
            push_subscription: SubscriptionParams {
                endpoint: subscription.endpoint.clone(),
                p256dh_key: subscription.p256dh.clone(),
                auth_key: subscription.auth.clone(),
            },
        }
    }
}
