pub mod models;
pub use models::*;

use anyhow::Result;
use async_trait::async_trait;

/// Permission state as reported by the notification platform. `Default`
/// means the user has not decided yet; a dismissed prompt leaves the
/// state at `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

/// Seam over the browser-provided push surface: permission state, the
/// service worker registry, the push manager, and the page's CSRF meta
/// tag. Controls only ever talk to the platform through this trait, so
/// tests can swap in a scripted implementation.
#[async_trait]
pub trait PushPlatform: Send + Sync {
    /// True iff the runtime exposes both the service worker and
    /// notification APIs. Cheap and synchronous; every visibility
    /// recomputation calls it.
    fn capability_present(&self) -> bool;

    fn current_permission(&self) -> Permission;

    /// Show the permission prompt and resolve to the permission the
    /// user landed on. A dismissed prompt resolves to `Default`.
    async fn request_permission(&self) -> Permission;

    /// The page's existing service worker registration, if any.
    async fn service_worker_registration(&self) -> Option<ServiceWorkerRegistration>;

    async fn register_service_worker(&self, url: &str) -> Result<ServiceWorkerRegistration>;

    /// Ask the push manager for a user-visible-only subscription keyed
    /// to the application server key (raw VAPID public key bytes).
    async fn subscribe(
        &self,
        registration: &ServiceWorkerRegistration,
        application_server_key: &[u8],
    ) -> Result<PushSubscription>;

    async fn unsubscribe(&self, subscription: &PushSubscription) -> Result<()>;

    /// Anti-forgery token from the page's `csrf-token` meta tag, if the
    /// page carries one.
    fn csrf_token(&self) -> Option<String>;
}
