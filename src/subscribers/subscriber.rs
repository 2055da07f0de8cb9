//! The [`Subscribe`] trait: an async consumer of coordinator events.

use async_trait::async_trait;

use crate::events::Event;

/// An asynchronous consumer of coordinator [`Event`]s.
///
/// Delivery is best-effort and sequential per event; implementations should
/// return quickly and must not assume they see every event (the bus drops
/// history for lagging receivers).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use rotavisor::{Event, EventKind, Subscribe};
///
/// struct ExitCounter(std::sync::atomic::AtomicU32);
///
/// #[async_trait]
/// impl Subscribe for ExitCounter {
///     fn name(&self) -> &str { "exit-counter" }
///
///     async fn on_event(&self, event: &Event) {
///         if event.kind == EventKind::ProcessExited {
///             self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Subscribe: Send + Sync {
    /// Stable subscriber name, used in diagnostics.
    fn name(&self) -> &str {
        "subscriber"
    }

    /// Handles one event.
    async fn on_event(&self, event: &Event);
}
