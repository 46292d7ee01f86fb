//! Broadcast event bus implementation.

use tokio::sync::broadcast;

use super::WorldEvent;

/// Fan-out channel for [`WorldEvent`]s.
///
/// Publishing never blocks; a subscriber that falls more than `capacity`
/// events behind observes `RecvError::Lagged` and skips ahead.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<WorldEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: WorldEvent) {
        if self.sender.send(event).is_err() {
            // No subscribers yet - this is normal, not an error
            tracing::trace!(target: "runtime::events", "no subscribers for world event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use game_core::HeroId;

    use super::*;

    #[tokio::test]
    async fn subscribers_receive_in_publish_order() {
        let bus = EventBus::with_capacity(8);
        let mut rx = bus.subscribe();
        let hero = HeroId::new(3).unwrap();

        bus.publish(WorldEvent::Notice {
            hero,
            message: "You died from Hero 1".into(),
        });
        bus.publish(WorldEvent::HeroKilled { hero });

        assert!(matches!(rx.recv().await.unwrap(), WorldEvent::Notice { .. }));
        assert_eq!(rx.recv().await.unwrap(), WorldEvent::HeroKilled { hero });
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(WorldEvent::MapChanged { map: String::new() });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
