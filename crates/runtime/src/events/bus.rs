//! Topic-based event bus implementation.

use std::sync::Arc;
use std::time::Duration;

use combat_core::{AudioCue, MatchResult, Vitals};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::Event;
use crate::api::Notifier;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Narration lines
    Narration,
    /// Vitals snapshots
    State,
    /// Audio cues
    Audio,
    /// Round and match boundaries
    Lifecycle,
}

struct Channels {
    narration: broadcast::Sender<Event>,
    state: broadcast::Sender<Event>,
    audio: broadcast::Sender<Event>,
    lifecycle: broadcast::Sender<Event>,
    /// Every event, in publication order.
    all: broadcast::Sender<Event>,
}

impl Channels {
    fn topic(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Narration => &self.narration,
            Topic::State => &self.state,
            Topic::Audio => &self.audio,
            Topic::Lifecycle => &self.lifecycle,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Ordering across topics is only observable through
/// [`EventBus::subscribe_all`].
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Channels {
            narration: broadcast::channel(capacity).0,
            state: broadcast::channel(capacity).0,
            audio: broadcast::channel(capacity).0,
            lifecycle: broadcast::channel(capacity).0,
            all: broadcast::channel(capacity).0,
        };

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if self.channels.topic(topic).send(event.clone()).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
        let _ = self.channels.all.send(event);
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.topic(topic).subscribe()
    }

    /// Subscribe to every topic through a single ordered stream.
    pub fn subscribe_all(&self) -> broadcast::Receiver<Event> {
        self.channels.all.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for EventBus {
    fn on_round_started(&self, round: u32, doublecast: bool) {
        self.publish(Event::RoundStarted { round, doublecast });
    }

    fn on_narration(&self, message: &str, display: Duration) {
        self.publish(Event::Narration {
            message: message.to_owned(),
            display_ms: u64::try_from(display.as_millis()).unwrap_or(u64::MAX),
        });
    }

    fn on_state_snapshot(&self, vitals: Vitals) {
        self.publish(Event::StateSnapshot(vitals));
    }

    fn on_audio_cue(&self, cue: AudioCue) {
        self.publish(Event::AudioCue { cue });
    }

    fn on_round_complete(&self, round: u32) {
        self.publish(Event::RoundComplete { round });
    }

    fn on_match_complete(&self, result: MatchResult) {
        self.publish(Event::MatchComplete { result });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_route_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut audio = bus.subscribe(Topic::Audio);
        let mut state = bus.subscribe(Topic::State);

        bus.on_audio_cue(AudioCue::Heal);
        bus.on_round_complete(1);

        assert_eq!(audio.recv().await.unwrap(), Event::AudioCue { cue: AudioCue::Heal });
        assert!(state.try_recv().is_err());
    }

    #[tokio::test]
    async fn ordered_stream_sees_every_topic() {
        let bus = EventBus::new();
        let mut all = bus.subscribe_all();

        bus.on_narration("Slot 1: Fire!", Duration::from_secs(2));
        bus.on_state_snapshot(Vitals::default());
        bus.on_match_complete(MatchResult::Draw);

        assert_eq!(all.recv().await.unwrap().topic(), Topic::Narration);
        assert_eq!(all.recv().await.unwrap().topic(), Topic::State);
        assert_eq!(
            all.recv().await.unwrap(),
            Event::MatchComplete {
                result: MatchResult::Draw
            }
        );
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.on_audio_cue(AudioCue::Attack);
    }
}
