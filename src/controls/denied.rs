use std::sync::{Arc, Mutex};

use crate::bus::{ListenerHandle, Signal, SignalBus};
use crate::platform::{Permission, PushPlatform};

/// Notice shown when push can never work here: permission denied or
/// the platform lacks push support entirely. Purely reactive; it only
/// listens and recomputes.
pub struct DeniedNotice {
    platform: Arc<dyn PushPlatform>,
    bus: Arc<SignalBus>,
    visible: bool,
    listeners: Vec<ListenerHandle>,
}

impl DeniedNotice {
    pub fn new(platform: Arc<dyn PushPlatform>, bus: Arc<SignalBus>) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            platform,
            bus,
            visible: false,
            listeners: Vec::new(),
        }))
    }

    /// Subscribe to both signals and compute initial visibility. The
    /// bus callbacks hold a weak reference so a dropped notice cannot
    /// be revived by a late broadcast.
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

        let mut notice = control.lock().unwrap();
        notice.listeners = listeners;
        notice.refresh();
    }

    pub fn unmount(&mut self) {
        for handle in self.listeners.drain(..) {
            self.bus.unsubscribe(handle);
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn refresh(&mut self) {
        self.visible = !self.platform.capability_present()
            || self.platform.current_permission() == Permission::Denied;
    }
}
