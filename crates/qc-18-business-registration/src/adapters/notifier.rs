//! Event notifier adapters.
//!
//! `BroadcastNotifier` fans events out over `tokio::sync::broadcast`, the same
//! multi-consumer channel the node's in-memory event bus uses.

use crate::domain::{BusinessEvent, PublishError};
use crate::ports::EventNotifier;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// In-process broadcast notifier.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<BusinessEvent>,
    events_published: AtomicU64,
}

impl BroadcastNotifier {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            events_published: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BusinessEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Total publish attempts, delivered or not.
    pub fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl EventNotifier for BroadcastNotifier {
    fn notify(&self, event: BusinessEvent) -> Result<usize, PublishError> {
        let topic = event.topic();
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(topic, receivers, "Business event broadcast");
                Ok(receivers)
            }
            Err(_) => Err(PublishError::NoSubscribers(topic.to_string())),
        }
    }
}

/// Notifier that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotifier;

impl EventNotifier for NoOpNotifier {
    fn notify(&self, _event: BusinessEvent) -> Result<usize, PublishError> {
        Ok(0)
    }
}
