use serde::{Deserialize, Serialize};

/// Opaque handle to a service worker registration. Only the scope is
/// carried; the worker script itself is never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceWorkerRegistration {
    pub scope: String,
}

/// A platform-issued push subscription. The browser hands the
/// encryption keys over base64-encoded, so they stay strings here.
/// Ownership passes to the server once the subscription is synced.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}
