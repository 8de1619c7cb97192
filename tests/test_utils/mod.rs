//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use tokio::sync::Notify;

use push_optin::platform::{
    Permission, PushPlatform, PushSubscription, ServiceWorkerRegistration,
};

/// A real uncompressed P-256 public key is 65 bytes; this encodes one.
pub const TEST_PUBLIC_KEY: &str =
    "BDd3_hVL9fZi9Ybo2UUzA284WG5FZR30_95YeZJsiApwXKpNcF1rRPF3foIiBHXRdJI2Qhumhf6_LFTeZaNndIo";

pub fn test_subscription() -> PushSubscription {
    PushSubscription {
        endpoint: "https://push.example.com/send/abc123".to_string(),
        p256dh: "client-p256dh-key".to_string(),
        auth: "client-auth-key".to_string(),
    }
}

/// Scripted stand-in for the browser push surface. Counters record how
/// often the push manager was touched so tests can assert on exact
/// call counts.
pub struct MockPlatform {
    capability: bool,
    permission: Mutex<Permission>,
    prompt_outcome: Permission,
    prompt_gate: Option<Arc<Notify>>,
    registration: Mutex<Option<ServiceWorkerRegistration>>,
    subscription: PushSubscription,
    subscribe_fails: bool,
    csrf_token: Option<String>,
    pub registered_urls: Mutex<Vec<String>>,
    pub subscribed_keys: Mutex<Vec<Vec<u8>>>,
    pub prompt_calls: AtomicUsize,
    pub subscribe_calls: AtomicUsize,
    pub unsubscribe_calls: AtomicUsize,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            capability: true,
            permission: Mutex::new(Permission::Default),
            prompt_outcome: Permission::Default,
            prompt_gate: None,
            registration: Mutex::new(None),
            subscription: test_subscription(),
            subscribe_fails: false,
            csrf_token: None,
            registered_urls: Mutex::new(Vec::new()),
            subscribed_keys: Mutex::new(Vec::new()),
            prompt_calls: AtomicUsize::new(0),
            subscribe_calls: AtomicUsize::new(0),
            unsubscribe_calls: AtomicUsize::new(0),
        }
    }

    pub fn without_capability(mut self) -> Self {
        self.capability = false;
        self
    }

    pub fn with_permission(self, permission: Permission) -> Self {
        *self.permission.lock().unwrap() = permission;
        self
    }

    /// What the user picks when the prompt is shown. `Default` means
    /// they dismiss it.
    pub fn with_prompt_outcome(mut self, outcome: Permission) -> Self {
        self.prompt_outcome = outcome;
        self
    }

    /// Hold the prompt open until the gate is notified, so a test can
    /// act while a prompt is still in flight.
    pub fn with_gated_prompt(mut self, gate: Arc<Notify>) -> Self {
        self.prompt_gate = Some(gate);
        self
    }

    pub fn with_existing_registration(self, scope: &str) -> Self {
        *self.registration.lock().unwrap() = Some(ServiceWorkerRegistration {
            scope: scope.to_string(),
        });
        self
    }

    pub fn with_csrf_token(mut self, token: &str) -> Self {
        self.csrf_token = Some(token.to_string());
        self
    }

    pub fn with_failing_subscribe(mut self) -> Self {
        self.subscribe_fails = true;
        self
    }

    pub fn set_permission(&self, permission: Permission) {
        *self.permission.lock().unwrap() = permission;
    }
}

#[async_trait]
impl PushPlatform for MockPlatform {
    fn capability_present(&self) -> bool {
        self.capability
    }

    fn current_permission(&self) -> Permission {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> Permission {
        self.prompt_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.prompt_gate {
            gate.notified().await;
        }
        if self.prompt_outcome != Permission::Default {
            *self.permission.lock().unwrap() = self.prompt_outcome;
        }
        self.prompt_outcome
    }

    async fn service_worker_registration(&self) -> Option<ServiceWorkerRegistration> {
        self.registration.lock().unwrap().clone()
    }

    async fn register_service_worker(&self, url: &str) -> Result<ServiceWorkerRegistration> {
        self.registered_urls.lock().unwrap().push(url.to_string());
        let registration = ServiceWorkerRegistration {
            scope: "/".to_string(),
        };
        *self.registration.lock().unwrap() = Some(registration.clone());
        Ok(registration)
    }

    async fn subscribe(
        &self,
        _registration: &ServiceWorkerRegistration,
        application_server_key: &[u8],
    ) -> Result<PushSubscription> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.subscribed_keys
            .lock()
            .unwrap()
            .push(application_server_key.to_vec());
        if self.subscribe_fails {
            return Err(anyhow!("push service rejected the subscription"));
        }
        Ok(self.subscription.clone())
    }

    async fn unsubscribe(&self, _subscription: &PushSubscription) -> Result<()> {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn csrf_token(&self) -> Option<String> {
        self.csrf_token.clone()
    }
}
