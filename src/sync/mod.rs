pub mod models;
pub use models::*;

use anyhow::Result;
use reqwest::Client;
use reqwest::header;

use crate::platform::{PushPlatform, PushSubscription};

/// Turbo-stream responses first, then plain HTML, so the endpoint can
/// answer either way.
const ACCEPT: &str = "text/vnd.turbo-stream.html, text/html, application/xhtml+xml";

const CSRF_HEADER: &str = "X-CSRF-Token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The server acknowledged the subscription with a success status.
    Accepted,
    /// The server rejected it (or was unreachable) and the platform
    /// subscription was unsubscribed so client and server agree again.
    RolledBack,
}

/// POST the subscription to `href` so the server can persist it.
///
/// A non-success status and a transport error are treated the same:
/// the now-orphaned platform subscription is unsubscribed and the call
/// resolves to `RolledBack` rather than an error. The response body is
/// never read; acknowledgement is the status code alone.
pub async fn sync_subscription(
    platform: &dyn PushPlatform,
    href: &str,
    subscription: &PushSubscription,
) -> Result<SyncOutcome> {
    let payload = SubscriptionPayload::from(subscription);

    let mut request = Client::new()
        .post(href)
        .header(header::ACCEPT, ACCEPT)
        .json(&payload);
    if let Some(token) = platform.csrf_token() {
        request = request.header(CSRF_HEADER, token);
    }

    match request.send().await {
        Ok(response) if response.status().is_success() => Ok(SyncOutcome::Accepted),
        Ok(response) => {
            tracing::warn!(
                "Sync endpoint rejected push subscription with status {}",
                response.status()
            );
            roll_back(platform, subscription).await;
            Ok(SyncOutcome::RolledBack)
        }
        Err(e) => {
            tracing::warn!("Failed to reach sync endpoint {}: {}", href, e);
            roll_back(platform, subscription).await;
            Ok(SyncOutcome::RolledBack)
        }
    }
}

// Best effort; a subscription that fails to unsubscribe is re-attempted
// on the next page load anyway.
async fn roll_back(platform: &dyn PushPlatform, subscription: &PushSubscription) {
    if let Err(e) = platform.unsubscribe(subscription).await {
        tracing::warn!("Failed to unsubscribe rejected push subscription: {}", e);
    }
}
