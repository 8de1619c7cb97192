use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

use crate::bus::{ListenerHandle, Signal, SignalBus};
use crate::key;
use crate::platform::{Permission, PushPlatform};
use crate::sync::{self, SyncOutcome};

/// Attributes the host supplies to the panel. `href` and `public_key`
/// gate eligibility; `service_worker_url` is only consulted when the
/// page has no registration yet.
#[derive(Debug, Clone, Default)]
pub struct PanelConfig {
    /// Sync endpoint the subscription is POSTed to.
    pub href: Option<String>,
    /// Where to register a service worker if none exists.
    pub service_worker_url: Option<String>,
    /// VAPID public key, base64url encoded.
    pub public_key: Option<String>,
}

/// Panel shown once permission is granted. Becoming visible is what
/// drives the whole subscription handshake: service worker
/// registration, push subscribe, and the sync POST run as one spawned
/// task.
pub struct GrantedPanel {
    platform: Arc<dyn PushPlatform>,
    bus: Arc<SignalBus>,
    config: PanelConfig,
    visible: bool,
    listeners: Vec<ListenerHandle>,
    sync_task: Option<JoinHandle<()>>,
}

impl GrantedPanel {
    pub fn new(
        platform: Arc<dyn PushPlatform>,
        bus: Arc<SignalBus>,
        config: PanelConfig,
    ) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            platform,
            bus,
            config,
            visible: false,
            listeners: Vec::new(),
            sync_task: None,
        }))
    }

    pub fn mount(control: &Arc<Mutex<Self>>) {
        let bus = Arc::clone(&control.lock().unwrap().bus);
        let mut listeners = Vec::new();
        for kind in [Signal::Granted, Signal::Denied] {
            let weak = Arc::downgrade(control);
            listeners.push(bus.subscribe(kind, move |_| {
                if let Some(control) = weak.upgrade() {
                    control.lock().unwrap().refresh();
                }
            }));
        }

        let mut panel = control.lock().unwrap();
        panel.listeners = listeners;
        panel.refresh();
    }

    pub fn unmount(&mut self) {
        for handle in self.listeners.drain(..) {
            self.bus.unsubscribe(handle);
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Replace the panel's attributes, recomputing state the way an
    /// attribute change callback would.
    pub fn update_config(&mut self, config: PanelConfig) {
        self.config = config;
        self.refresh();
    }

    /// Recompute visibility. The handshake fires only on the
    /// hidden-to-visible transition, so redundant bus events while
    /// already visible do not re-submit the subscription.
    pub fn refresh(&mut self) {
        let eligible = self.eligible();
        if eligible && !self.visible {
            self.sync_task = Some(self.spawn_handshake());
        }
        self.visible = eligible;
    }

    /// The in-flight handshake, if one was started and has not been
    /// claimed yet. Hosts that care about settlement (tests, mainly)
    /// can await it; nobody has to.
    pub fn take_sync_task(&mut self) -> Option<JoinHandle<()>> {
        self.sync_task.take()
    }

    fn eligible(&self) -> bool {
        self.platform.capability_present()
            && self.platform.current_permission() == Permission::Granted
            && self.config.href.is_some()
            && self.config.public_key.is_some()
    }

    fn spawn_handshake(&self) -> JoinHandle<()> {
        let platform = Arc::clone(&self.platform);
        let config = self.config.clone();
        tokio::spawn(async move {
            // Failures are not retried; the next page load starts the
            // handshake over from scratch.
            if let Err(e) = establish_subscription(platform, config).await {
                tracing::error!("Failed to establish push subscription: {}", e);
            }
        })
    }
}

async fn establish_subscription(
    platform: Arc<dyn PushPlatform>,
    config: PanelConfig,
) -> Result<SyncOutcome> {
    let href = config.href.context("href not set")?;
    let encoded_key = config.public_key.context("public-key not set")?;
    let application_server_key = key::decode_vapid_key(&encoded_key)?;

    let registration = match platform.service_worker_registration().await {
        Some(registration) => registration,
        None => {
            let url = config
                .service_worker_url
                .context("no service worker registered and service-worker-url not set")?;
            platform.register_service_worker(&url).await?
        }
    };

    let subscription = platform.subscribe(&registration, &application_server_key).await?;
    sync::sync_subscription(platform.as_ref(), &href, &subscription).await
}
