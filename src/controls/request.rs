use std::sync::{Arc, Mutex};

use crate::bus::{Signal, SignalBus};
use crate::platform::{Permission, PushPlatform};

/// The "turn on notifications" affordance. Visible only while the user
/// has not decided; activating it shows the platform permission prompt
/// and broadcasts the outcome on the bus.
pub struct RequestControl {
    platform: Arc<dyn PushPlatform>,
    bus: Arc<SignalBus>,
    visible: bool,
    prompt_in_flight: bool,
}

impl RequestControl {
    pub fn new(platform: Arc<dyn PushPlatform>, bus: Arc<SignalBus>) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self {
            platform,
            bus,
            visible: false,
            prompt_in_flight: false,
        }))
    }

    pub fn mount(&mut self) {
        self.refresh();
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Recompute visibility. The host calls this at mount and whenever
    /// an attribute changes; activation calls it after the prompt
    /// resolves, which hides the control once permission leaves
    /// `Default`.
    pub fn refresh(&mut self) {
        self.visible = self.platform.capability_present()
            && self.platform.current_permission() == Permission::Default;
    }

    /// Handle a user activation. Ignored while hidden or while a prompt
    /// is already in flight, so repeated clicks cannot double-prompt. A
    /// dismissed prompt broadcasts nothing.
    pub async fn activate(control: &Arc<Mutex<Self>>) {
        let (platform, bus) = {
            let mut request = control.lock().unwrap();
            if !request.visible || request.prompt_in_flight {
                return;
            }
            request.prompt_in_flight = true;
            (Arc::clone(&request.platform), Arc::clone(&request.bus))
        };

        // The lock is not held across the prompt; bus listeners may
        // re-enter other controls while this resolves.
        match platform.request_permission().await {
            Permission::Granted => bus.broadcast(Signal::Granted),
            Permission::Denied => bus.broadcast(Signal::Denied),
            Permission::Default => {}
        }

        let mut request = control.lock().unwrap();
        request.prompt_in_flight = false;
        request.refresh();
    }
}
