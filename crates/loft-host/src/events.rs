//! Event fan-out for host observability
//!
//! The EventBus broadcasts lifecycle events to any number of subscribers.
//! Emission never blocks and never fails; with no subscribers events are
//! simply dropped.

use loft_types::{HostEvent, HostEventEnvelope};
use tokio::sync::broadcast;

/// Channel capacity for the event stream
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Broadcasts host lifecycle events to subscribers.
pub struct EventBus {
    tx: broadcast::Sender<HostEventEnvelope>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<HostEventEnvelope> {
        self.tx.subscribe()
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Emit an event. Severity is inferred from the event kind.
    pub fn emit(&self, event: HostEvent) {
        // No subscribers is fine
        let _ = self.tx.send(HostEventEnvelope::new(event));
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loft_types::EventSeverity;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn emitted_events_reach_subscribers() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(HostEvent::AppLoaded {
            name: "music-player".into(),
        });

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("receive error");

        assert_eq!(received.severity, EventSeverity::Info);
        assert!(matches!(received.event, HostEvent::AppLoaded { ref name } if name == "music-player"));
    }

    #[test]
    fn emit_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.emit(HostEvent::RouteUnmatched { path: "/".into() });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
