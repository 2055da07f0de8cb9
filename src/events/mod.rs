//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to state transitions of the rotation coordinator.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload metadata
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publisher**: the [`Coordinator`](crate::Coordinator) (sole publisher;
//!   every transition of the rotation state machine emits exactly one event).
//! - **Consumers**: the subscriber listener (fans out to
//!   [`SubscriberSet`](crate::SubscriberSet)) and any test harness that
//!   subscribes directly.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
