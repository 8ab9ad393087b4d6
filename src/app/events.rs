//! Event bus for cross-component notifications.
//!
//! The state manager publishes an [`AppEvent`] after every settled request so
//! a front end can re-render, and a [`AppEvent::SyncFailed`] whenever the
//! local list stops reflecting an intended change.

use chrono::NaiveDate;
use tokio::sync::broadcast;

use crate::domain::ItemId;

/// Buffered events per subscriber before lagging receivers drop old ones.
const EVENT_CAPACITY: usize = 64;

/// Notifications emitted by the shopping list state manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The selected day changed.
    DateSelected(NaiveDate),
    /// Rows for a day were fetched and applied.
    ItemsLoaded {
        /// Day that was loaded.
        date: NaiveDate,
        /// Rows received.
        count: usize,
    },
    /// A row was created or replaced locally.
    ItemChanged(ItemId),
    /// A row left the local list.
    ItemRemoved(ItemId),
    /// Favorite flag changed for every row with this name.
    FavoriteChanged {
        /// Item name.
        text: String,
        /// New flag.
        favorite: bool,
    },
    /// A search match is being highlighted.
    HighlightStarted(ItemId),
    /// The highlight timer elapsed.
    HighlightCleared,
    /// A search produced no dated purchases.
    SearchNotFound(String),
    /// A request failed; local state was left as it was.
    SyncFailed {
        /// Operation that failed.
        operation: &'static str,
        /// Error description.
        message: String,
    },
}

/// Broadcast channel for [`AppEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Subscribes to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(AppEvent::HighlightCleared);
    }

    #[tokio::test]
    async fn subscribers_receive_events_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(AppEvent::ItemChanged(ItemId(1)));
        bus.publish(AppEvent::ItemRemoved(ItemId(1)));

        assert_eq!(rx.recv().await.unwrap(), AppEvent::ItemChanged(ItemId(1)));
        assert_eq!(rx.recv().await.unwrap(), AppEvent::ItemRemoved(ItemId(1)));
    }
}
