//! # Fan-out of bus events to a fixed set of subscribers.
//!
//! [`SubscriberSet`] owns the subscribers and delivers each event to all of
//! them in order. [`SubscriberSet::spawn_listener`] runs the delivery loop on
//! its own task so the coordinator never waits on a subscriber.
//!
//! ```text
//! Coordinator ── publish ──► Bus ──► listener task ──► sub1.on_event(&ev)
//!                                                  ──► sub2.on_event(&ev)
//!                                                  ──► ...
//! ```
//!
//! On cancellation the listener drains whatever already sits in the bus
//! buffer before exiting, so final transitions (e.g. `Drained`) still reach
//! the log.

use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event};
use crate::subscribers::Subscribe;

/// A fixed set of subscribers receiving every bus event.
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set over the given subscribers.
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Delivers one event to every subscriber, in order.
    pub async fn emit(&self, event: &Event) {
        for sub in &self.subs {
            sub.on_event(event).await;
        }
    }

    /// Spawns the delivery loop: subscribe to `bus`, forward every event
    /// until `token` is cancelled, then drain the remaining buffered events.
    ///
    /// Lagged receivers skip the lost events and keep going.
    pub fn spawn_listener(self: Arc<Self>, bus: &Bus, token: CancellationToken) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => self.emit(&ev).await,
                        Err(RecvError::Closed) => return,
                        Err(RecvError::Lagged(_)) => continue,
                    }
                }
            }

            // Drain events published before cancellation.
            loop {
                match rx.try_recv() {
                    Ok(ev) => self.emit(&ev).await,
                    Err(TryRecvError::Lagged(_)) => continue,
                    Err(_) => break,
                }
            }
        });
    }
}
