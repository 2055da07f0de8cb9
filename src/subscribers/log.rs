//! # Diagnostic log subscriber.
//!
//! [`LogWriter`] renders events as human-readable lines on stderr, prefixed
//! so they are easy to tell apart from the supervised processes' own output:
//!
//! ```text
//! rotavisor | starting: command="srv :%alt" ...
//! rotavisor | rotating to value "3001"
//! rotavisor | value "3001": process started
//! rotavisor | value "3000": sending TERM in 10s
//! rotavisor | value "3000": TERM sent
//! rotavisor | value "3000": process exited
//! rotavisor | rotation to "3001" canceled: process no longer running
//! ```
//!
//! These lines are diagnostics, not a stable format; tests key off events on
//! the bus instead.

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Renders coordinator events as prefixed lines on stderr.
pub struct LogWriter {
    prefix: &'static str,
}

impl LogWriter {
    pub fn new() -> Self {
        Self {
            prefix: "rotavisor |",
        }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    fn name(&self) -> &str {
        "log-writer"
    }

    async fn on_event(&self, e: &Event) {
        let p = self.prefix;
        let value = e.value.as_deref().unwrap_or("?");
        match e.kind {
            EventKind::Starting => {
                eprintln!("{p} starting: {}", e.reason.as_deref().unwrap_or(""));
            }
            EventKind::RotateRequested => {
                eprintln!("{p} rotating to value {value:?}");
            }
            EventKind::RotateConflict => {
                let why = e.reason.as_deref().unwrap_or("conflict");
                eprintln!("{p} ignoring rotate to {value:?}: {why}");
            }
            EventKind::ProcessStarted => {
                eprintln!("{p} value {value:?}: process started");
            }
            EventKind::SpawnFailed => {
                let why = e.reason.as_deref().unwrap_or("unknown error");
                eprintln!("{p} value {value:?}: failed to start: {why}");
            }
            EventKind::OverlapScheduled => {
                let ms = e.delay_ms.unwrap_or(0);
                eprintln!("{p} value {value:?}: sending TERM in {ms}ms");
            }
            EventKind::Rotated => {
                eprintln!("{p} value {value:?} is now current");
            }
            EventKind::RotationCanceled => {
                eprintln!("{p} rotation to {value:?} canceled: process no longer running");
            }
            EventKind::TerminateSent => {
                eprintln!("{p} value {value:?}: TERM sent");
            }
            EventKind::SignalFailed => {
                let why = e.reason.as_deref().unwrap_or("unknown error");
                eprintln!("{p} value {value:?}: failed to signal: {why}");
            }
            EventKind::ProcessExited => {
                eprintln!("{p} value {value:?}: process exited");
            }
            EventKind::ShutdownRequested => {
                eprintln!("{p} shutdown requested, terminating all processes");
            }
            EventKind::KillRequested => {
                eprintln!("{p} kill requested, killing all processes and exiting");
            }
            EventKind::Drained => {
                eprintln!("{p} all processes have exited, exiting");
            }
        }
    }
}
