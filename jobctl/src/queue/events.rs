//! Queue state-change events.
//!
//! The state store publishes an event after each committed transition;
//! independent subscribers (status displays, caches) refresh from it instead
//! of polling.

use tokio::sync::broadcast;

use crate::queue::state::QueueState;

/// Default channel capacity for queue events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Events broadcast when queue control state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    /// A queue's control state transitioned. Carries the post-update state.
    Updated(QueueState),
}

impl QueueEvent {
    /// Get a description of the event for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Updated(state) => {
                format!("Queue updated: {} (paused={})", state.name, state.is_paused)
            }
        }
    }
}

/// Broadcaster for queue update events.
///
/// Uses tokio's broadcast channel to distribute events to multiple
/// subscribers.
pub struct QueueEventBroadcaster {
    sender: broadcast::Sender<QueueEvent>,
}

impl QueueEventBroadcaster {
    /// Create a new broadcaster with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new broadcaster with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to queue update events.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.sender.subscribe()
    }

    /// Publish a queue update event.
    ///
    /// Returns the number of receivers that received the event, 0 if there
    /// are no active subscribers.
    pub fn publish(&self, event: QueueEvent) -> usize {
        tracing::debug!("Publishing queue event: {}", event.description());
        // send() returns Err if there are no receivers, which is fine
        self.sender.send(event).unwrap_or(0)
    }

    /// Get the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for QueueEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for QueueEventBroadcaster {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
