//! Native-to-host event emission.
//!
//! Independent of any single session's completion, the native layer may push
//! intermediate notifications (partial selection, input-mode changes) to the
//! host environment. The module binds an [`EventEmitter`] to its presenter
//! exactly once at construction; the host side subscribes through a
//! broadcast receiver. Zero or more events per module instance, multi-fire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Unique event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evt_{}", self.0)
    }
}

/// One notification pushed from the native layer to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerEvent {
    /// Unique event ID.
    pub id: EventId,

    /// Event name, as the host environment expects to receive it.
    pub name: String,

    /// Untyped event body; the bridge does not interpret it.
    pub body: serde_json::Value,

    /// Timestamp.
    pub timestamp: DateTime<Utc>,
}

impl PickerEvent {
    /// Create a new event.
    pub fn new(name: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            name: name.into(),
            body,
            timestamp: Utc::now(),
        }
    }
}

/// Event receiver (broadcast channel).
pub type EventReceiver = broadcast::Receiver<PickerEvent>;

struct Hub {
    sender: broadcast::Sender<PickerEvent>,
    recent: Mutex<Vec<PickerEvent>>,
    max_recent: usize,
}

impl Hub {
    fn emit(&self, event: PickerEvent) {
        {
            let mut recent = self.recent.lock().unwrap();
            recent.push(event.clone());
            if recent.len() > self.max_recent {
                recent.remove(0);
            }
        }
        // No subscribers is fine; the event is simply dropped.
        let _ = self.sender.send(event);
    }
}

/// Cloneable emission handle bound to a presenter at module construction.
///
/// This is the only registration surface: no global or static state, the
/// handle is plain owned data and dies with whatever holds it.
#[derive(Clone)]
pub struct EventEmitter {
    hub: Arc<Hub>,
}

impl EventEmitter {
    /// Push an event by name with an untyped body.
    pub fn emit(&self, name: impl Into<String>, body: serde_json::Value) {
        self.hub.emit(PickerEvent::new(name, body));
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter").finish()
    }
}

/// Fan-out hub owned by a module instance.
///
/// Keeps a bounded buffer of recent events for inspection alongside the live
/// broadcast channel.
pub struct EventManager {
    hub: Arc<Hub>,
}

impl EventManager {
    /// Create a new event manager with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            hub: Arc::new(Hub {
                sender,
                recent: Mutex::new(Vec::new()),
                max_recent: 100,
            }),
        }
    }

    /// Hand out the emission handle for the native layer.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            hub: self.hub.clone(),
        }
    }

    /// Record and broadcast an event.
    pub fn emit(&self, event: PickerEvent) {
        self.hub.emit(event);
    }

    /// Subscribe to live events.
    pub fn subscribe(&self) -> EventReceiver {
        self.hub.sender.subscribe()
    }

    /// Get recent events, newest first.
    pub fn recent(&self, limit: usize) -> Vec<PickerEvent> {
        let recent = self.hub.recent.lock().unwrap();
        recent.iter().rev().take(limit).cloned().collect()
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_creation() {
        let event = PickerEvent::new("onPickerDismiss", json!({}));
        assert_eq!(event.name, "onPickerDismiss");
        assert!(event.body.is_object());
    }

    #[tokio::test]
    async fn test_emitter_reaches_subscriber() {
        let manager = EventManager::new(10);
        let mut rx = manager.subscribe();
        let emitter = manager.emitter();

        emitter.emit("onDateChange", json!({ "timestamp": 1.5e12 }));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, "onDateChange");
        assert_eq!(event.body["timestamp"], json!(1.5e12));
    }

    #[test]
    fn test_emit_without_subscribers_is_fine() {
        let manager = EventManager::new(10);
        manager.emitter().emit("onDateChange", json!(null));
    }

    #[test]
    fn test_emitter_events_land_in_recent_buffer() {
        let manager = EventManager::new(10);
        manager.emitter().emit("first", json!(1));
        manager.emit(PickerEvent::new("second", json!(2)));

        let recent = manager.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "second");
        assert_eq!(recent[1].name, "first");
    }
}
