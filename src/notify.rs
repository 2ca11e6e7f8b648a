//! In-process fan-out for dish change events.
//!
//! Delivery is best-effort: no retry, no acknowledgment, no backlog for
//! subscribers that connect after a publish. Dropping the receiver is the
//! unsubscribe.

use tokio::sync::broadcast;
use tracing::debug;

use crate::dish::Dish;

// Slow subscribers skip events past this buffer rather than blocking the
// publisher.
const CHANNEL_CAPACITY: usize = 64;

/// Broadcaster behind the `dishUpdated` event.
///
/// Constructed once and injected into the service; handles are cheap clones
/// of the same channel.
#[derive(Clone)]
pub struct DishEvents {
    tx: broadcast::Sender<Dish>,
}

impl DishEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Delivers `dish` to every current subscriber. Non-blocking; a publish
    /// with no subscribers is not an error.
    pub fn publish(&self, dish: Dish) {
        if self.tx.send(dish).is_err() {
            debug!("dishUpdated dropped, no subscribers connected");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Dish> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for DishEvents {
    fn default() -> Self {
        Self::new()
    }
}
