//! Event subscribers: trait, fan-out set, and the built-in log writer.
//!
//! Subscribers consume [`Event`](crate::Event)s published on the
//! [`Bus`](crate::Bus). The coordinator never waits on them; a listener task
//! drains the bus and fans each event out via [`SubscriberSet`].
//!
//! - [`Subscribe`] — the subscriber trait (`async_trait`).
//! - [`SubscriberSet`] — fan-out over a fixed set of subscribers.
//! - [`LogWriter`] — renders events as diagnostic lines on stderr.

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
