use tokio::sync::broadcast;

use super::LotteryEvent;

/// In-process publish point for lottery events.
///
/// Constructed once at startup and injected into the services that publish
/// and the stream gateway that subscribes. Publishing is fire-and-forget:
/// with no subscribers the event is dropped, since the ticket-status endpoint
/// is the durability fallback. Every subscriber receives every event in
/// publish order. This does not fan out across server instances.
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<LotteryEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: LotteryEvent) {
        let label = event.label();
        if self.tx.send(event).is_err() {
            // No subscribers connected; the event is intentionally dropped
            log::debug!("Dropped {label} event: no active subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LotteryEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DrawCompletedPayload, DrawStartedPayload, NumbersDrawnPayload};
    use chrono::Utc;

    fn draw_started(draw_id: &str) -> LotteryEvent {
        LotteryEvent::DrawStarted(DrawStartedPayload {
            draw_id: draw_id.to_string(),
            participant_count: 2,
            estimated_duration_secs: 10,
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let broadcaster = EventBroadcaster::new(16);
        assert_eq!(broadcaster.subscriber_count(), 0);
        // Must not panic or error
        broadcaster.publish(draw_started("d1"));
    }

    #[tokio::test]
    async fn test_subscribers_receive_events_in_publish_order() {
        let broadcaster = EventBroadcaster::new(16);
        let mut rx = broadcaster.subscribe();

        let now = Utc::now();
        broadcaster.publish(draw_started("d1"));
        broadcaster.publish(LotteryEvent::NumbersDrawn(NumbersDrawnPayload {
            draw_id: "d1".to_string(),
            winning_number: 7,
            timestamp: now,
        }));
        broadcaster.publish(LotteryEvent::DrawCompleted(DrawCompletedPayload {
            draw_id: "d1".to_string(),
            winning_number: 7,
            winner_count: 1,
            participant_count: 2,
            timestamp: now,
        }));

        let labels = [
            rx.recv().await.unwrap().label(),
            rx.recv().await.unwrap().label(),
            rx.recv().await.unwrap().label(),
        ];
        assert_eq!(labels, ["draw-started", "numbers-drawn", "draw-completed"]);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_each_receive_every_event() {
        let broadcaster = EventBroadcaster::new(16);
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);

        broadcaster.publish(draw_started("d2"));

        assert_eq!(rx1.recv().await.unwrap().label(), "draw-started");
        assert_eq!(rx2.recv().await.unwrap().label(), "draw-started");
    }
}
