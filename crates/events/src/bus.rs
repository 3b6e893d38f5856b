use serde::{Deserialize, Serialize};
use telemetry::debug;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{Event, EventPublisher, EventSubscriber, DEFAULT_BUFFER};

/// An event wrapped with a unique id so subscribers can tell repeated
/// announcements apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: Uuid,
    pub event: Event,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self::new_with_id(Uuid::new_v4(), event)
    }

    pub fn new_with_id(id: Uuid, event: Event) -> Self {
        Self { id, event }
    }
}

impl From<Event> for EventMessage {
    fn from(event: Event) -> Self {
        Self::new(event)
    }
}

/// Fire-and-forget fan-out of ballot events.
///
/// Publishing never fails: with no subscribers the event is dropped, and a
/// subscriber that falls more than the buffer size behind loses the oldest
/// events.
#[derive(Debug, Clone)]
pub struct EventBus {
    publisher: EventPublisher,
}

impl EventBus {
    pub fn new(buffer: usize) -> Self {
        let (publisher, _) = broadcast::channel(buffer.max(1));

        Self { publisher }
    }

    pub fn subscribe(&self) -> EventSubscriber {
        self.publisher.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.publisher.receiver_count()
    }

    pub fn publish(&self, event: impl Into<Event>) {
        let message = EventMessage::new(event.into());
        let kind = message.event.kind();

        if let Err(err) = self.publisher.send(message) {
            debug!(event = kind, "event dropped: {err}");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER)
    }
}

#[cfg(test)]
mod tests {
    use primitives::{BallotId, Identity};
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::{VoteCastData, VotingEndedData};

    fn vote_cast(ballot_id: BallotId) -> VoteCastData {
        VoteCastData {
            ballot_id,
            voter: Identity::new("alice").unwrap(),
            option_index: 0,
            option: "Yes".to_string(),
        }
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::default();

        bus.publish(vote_cast(BallotId::new()));

        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_event() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        let ballot_id = BallotId::new();

        bus.publish(vote_cast(ballot_id));

        let a = first.recv().await.unwrap();
        let b = second.recv().await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.event, Event::VoteCast(vote_cast(ballot_id)));
    }

    #[tokio::test]
    async fn repeated_announcements_get_distinct_ids() {
        let bus = EventBus::new(8);
        let mut sub = bus.subscribe();
        let ended = VotingEndedData {
            ballot_id: BallotId::new(),
            total_votes: 4,
            winning_option: "Yes".to_string(),
            winning_votes: 2,
        };

        bus.publish(ended.clone());
        bus.publish(ended);

        let a = sub.recv().await.unwrap();
        let b = sub.recv().await.unwrap();

        assert_eq!(a.event, b.event);
        assert_ne!(a.id, b.id);
        assert_eq!(sub.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn zero_sized_buffer_is_bumped() {
        let bus = EventBus::new(0);
        let mut sub = bus.subscribe();

        let ballot_id = BallotId::new();

        bus.publish(vote_cast(ballot_id));

        assert_eq!(
            sub.try_recv().unwrap().event,
            Event::VoteCast(vote_cast(ballot_id))
        );
    }
}
