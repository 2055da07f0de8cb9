//! # Runtime events emitted by the rotation coordinator.
//!
//! [`EventKind`] classifies every observable transition of the rotation
//! state machine: process lifecycle (started, exited), rotation progress
//! (requested, pending, committed, canceled), signal delivery, and the
//! shutdown/teardown paths. [`Event`] carries the metadata: the rotation
//! value involved, a human-readable reason, and the overlap delay.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Since the coordinator is the only publisher, `seq` order
//! equals transition order.
//!
//! ## Example
//! ```rust
//! use rotavisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::SpawnFailed)
//!     .with_value("3001")
//!     .with_reason("no such file or directory");
//!
//! assert_eq!(ev.kind, EventKind::SpawnFailed);
//! assert_eq!(ev.value.as_deref(), Some("3001"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of coordinator events.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Run lifecycle ===
    /// The run begins.
    ///
    /// Sets:
    /// - `reason`: configuration summary
    Starting,

    /// The registry emptied; the coordinator exits its loop.
    Drained,

    // === Rotation flow ===
    /// A rotate trigger arrived.
    ///
    /// Sets:
    /// - `value`: the target (next) rotation value
    RotateRequested,

    /// A rotate trigger was ignored.
    ///
    /// Sets:
    /// - `value`: the target value
    /// - `reason`: `"already running"` or `"draining"`
    RotateConflict,

    /// A rotation is pending: the replacement is live and the previous
    /// process will be retired once the overlap elapses.
    ///
    /// Sets:
    /// - `value`: the value being retired (current slot)
    /// - `delay_ms`: the overlap duration
    OverlapScheduled,

    /// The cursor advanced; the named value is the new current slot.
    ///
    /// Sets:
    /// - `value`: the new current value
    Rotated,

    /// An overlap elapsed but the replacement process had already exited;
    /// the rotation is abandoned without retiring anything.
    ///
    /// Sets:
    /// - `value`: the replacement value that is no longer live
    RotationCanceled,

    // === Process lifecycle ===
    /// A process was started for a value.
    ///
    /// Sets:
    /// - `value`: the rotation value
    ProcessStarted,

    /// A process start failed. Recoverable unless it was the very first.
    ///
    /// Sets:
    /// - `value`: the rotation value
    /// - `reason`: the spawn error
    SpawnFailed,

    /// A process exit was observed and its registry entry removed.
    ///
    /// Sets:
    /// - `value`: the rotation value
    ProcessExited,

    // === Signal delivery ===
    /// A graceful-terminate signal was delivered.
    ///
    /// Sets:
    /// - `value`: the rotation value signaled
    TerminateSent,

    /// A signal could not be delivered. Logged only, never escalated.
    ///
    /// Sets:
    /// - `value`: the rotation value
    /// - `reason`: the delivery error
    SignalFailed,

    // === Shutdown paths ===
    /// A shutdown trigger arrived; every live process is asked to terminate
    /// and no further rotations are accepted.
    ShutdownRequested,

    /// A forced-kill trigger arrived; every live process is killed and the
    /// loop returns without waiting for exits.
    KillRequested,
}

/// Coordinator event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Rotation value involved, if applicable.
    pub value: Option<Arc<str>>,
    /// Human-readable reason (errors, conflict cause, config summary).
    pub reason: Option<Arc<str>>,
    /// Overlap delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            value: None,
            reason: None,
            delay_ms: None,
        }
    }

    /// Attaches the rotation value.
    #[inline]
    pub fn with_value(mut self, value: impl Into<Arc<str>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the overlap delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::new(EventKind::Starting);
        let b = Event::new(EventKind::Drained);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::new(EventKind::OverlapScheduled)
            .with_value("3000")
            .with_delay(Duration::from_secs(10));
        assert_eq!(ev.value.as_deref(), Some("3000"));
        assert_eq!(ev.delay_ms, Some(10_000));
        assert!(ev.reason.is_none());
    }
}
