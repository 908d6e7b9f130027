//! Subscriber registry
//!
//! Maps event names to ordered sets of callbacks. Membership is keyed on
//! callback identity (the `Arc` allocation): registering a clone of the
//! same `Arc` twice collapses to a single registration, and `off` removes
//! by the same identity.
//!
//! Dispatch snapshots the callback list under the read lock and invokes
//! outside it, so callbacks may re-enter `on`/`off`/`emit` freely. A
//! callback registered during a dispatch first sees the next delivery.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Subscriber callback.
///
/// Identity for `off` and duplicate collapsing is the `Arc` allocation,
/// not the closure type: hold on to the `Arc` (or the returned
/// [`Subscription`]) to unsubscribe later.
pub type EventCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// Identity key of a registered callback
fn callback_id(callback: &EventCallback) -> usize {
    Arc::as_ptr(callback) as *const () as usize
}

/// Registry of event-name subscribers
#[derive(Default)]
pub struct EventRegistry {
    subscribers: RwLock<HashMap<String, Vec<(usize, EventCallback)>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` under `event`.
    ///
    /// Re-registering the same callback instance is a no-op.
    pub fn on(&self, event: &str, callback: EventCallback) {
        let id = callback_id(&callback);
        let mut subscribers = self.subscribers.write();
        let entry = subscribers.entry(event.to_string()).or_default();
        if entry.iter().all(|(existing, _)| *existing != id) {
            entry.push((id, callback));
        }
    }

    /// Remove `callback` from `event` if present; no-op otherwise.
    pub fn off(&self, event: &str, callback: &EventCallback) {
        let id = callback_id(callback);
        let mut subscribers = self.subscribers.write();
        if let Some(entry) = subscribers.get_mut(event) {
            entry.retain(|(existing, _)| *existing != id);
            if entry.is_empty() {
                subscribers.remove(event);
            }
        }
    }

    /// Deliver `value` to every callback registered under `event`, in
    /// registration order. Each callback is invoked exactly once.
    pub fn dispatch(&self, event: &str, value: &Value) {
        let snapshot: Vec<EventCallback> = {
            let subscribers = self.subscribers.read();
            match subscribers.get(event) {
                Some(entry) => entry.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
                None => return,
            }
        };

        for callback in snapshot {
            callback(value);
        }
    }

    /// Number of callbacks currently registered under `event`
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers.read().get(event).map_or(0, Vec::len)
    }
}

/// Unsubscribe handle returned by `on`.
///
/// Calling [`unsubscribe`](Subscription::unsubscribe) is equivalent to
/// `off(event, &callback)`. Dropping the handle without calling it leaves
/// the registration in place.
pub struct Subscription {
    registry: Arc<EventRegistry>,
    event: String,
    callback: EventCallback,
}

impl Subscription {
    pub(crate) fn new(registry: Arc<EventRegistry>, event: String, callback: EventCallback) -> Self {
        Self {
            registry,
            event,
            callback,
        }
    }

    /// Event name this subscription is registered under
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Remove the registration
    pub fn unsubscribe(self) {
        self.registry.off(&self.event, &self.callback);
    }
}
