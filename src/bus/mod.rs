use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// The two signals a permission prompt can broadcast. No payload; the
/// kind is the whole message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Granted,
    Denied,
}

/// Handle returned by [`SignalBus::subscribe`], used to remove the
/// listener again when its control unmounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(u64);

struct Listener {
    id: u64,
    kind: Signal,
    callback: Arc<dyn Fn(Signal) + Send + Sync>,
}

/// Instance-scoped publish/subscribe channel between the controls.
///
/// This replaces broadcasting through a document-global event target:
/// every page (and every test) builds its own bus and hands it to the
/// controls it mounts. Delivery is synchronous and in registration
/// order; callbacks run outside the internal lock so a callback may
/// subscribe or unsubscribe reentrantly.
pub struct SignalBus {
    listeners: Mutex<Vec<Listener>>,
    next_id: AtomicU64,
}

impl SignalBus {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn subscribe(
        &self,
        kind: Signal,
        callback: impl Fn(Signal) + Send + Sync + 'static,
    ) -> ListenerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().push(Listener {
            id,
            kind,
            callback: Arc::new(callback),
        });
        ListenerHandle(id)
    }

    pub fn unsubscribe(&self, handle: ListenerHandle) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|listener| listener.id != handle.0);
    }

    pub fn broadcast(&self, kind: Signal) {
        let matching: Vec<Arc<dyn Fn(Signal) + Send + Sync>> = self
            .listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|listener| listener.kind == kind)
            .map(|listener| Arc::clone(&listener.callback))
            .collect();
        for callback in matching {
            callback(kind);
        }
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}
