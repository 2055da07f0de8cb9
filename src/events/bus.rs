//! # Event bus for broadcasting coordinator events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. The
//! coordinator publishes without blocking; subscribers (the log fan-out,
//! test harnesses) each get an independent receiver.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or fails.
//! - **Bounded capacity**: a ring buffer of recent events shared by all
//!   receivers; slow receivers observe `RecvError::Lagged(n)`.
//! - **Best-effort**: events are dropped if nobody is subscribed. The
//!   coordinator's own control and exit channels are separate mpsc channels
//!   and are lossless; the bus is observability only.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for coordinator events.
///
/// Cheap to clone (internally an `Arc`-backed sender).
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to >= 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver observing subsequent events.
    ///
    /// A receiver only gets events sent after it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
