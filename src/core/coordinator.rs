//! # Coordinator: the rotation/overlap/drain state machine.
//!
//! One single-threaded event loop owns the [`Cursor`] and [`Registry`] and
//! multiplexes every input through `tokio::select!`:
//!
//! ```text
//! loop {
//!   ├─► Control::Rotate    → conflict-check next value, start replacement,
//!   │                        then retire current now (overlap = 0) or
//!   │                        schedule the overlap timer
//!   ├─► Control::Shutdown  → TERM every live process, enter draining
//!   ├─► Control::Kill      → KILL every live process, return immediately
//!   ├─► overlap fired      → re-validate next is still live, then retire
//!   │                        current and advance the cursor
//!   └─► process exited     → drop from registry; empty registry ends the run
//! }
//! ```
//!
//! ## Rules
//! - Events are handled strictly one at a time, in arrival order.
//! - Liveness is never assumed from having started a process: both the
//!   rotate and the overlap paths re-check the registry, which makes the
//!   "new process died before the overlap elapsed" race a safe no-op.
//! - At most one rotation is in flight: while an overlap is pending the
//!   cursor has not advanced, so further rotate triggers hit the conflict
//!   guard on the still-live next value.
//! - Only the first start can fail the run; later spawn and signal failures
//!   are published as events and the current process keeps running.

use tokio::sync::mpsc;

use crate::config::Config;
use crate::core::cursor::Cursor;
use crate::core::registry::Registry;
use crate::core::runner::{Runner, SignalKind, Sink};
use crate::error::{RuntimeError, SpawnError};
use crate::events::{Bus, Event, EventKind};

/// Control inputs to the coordinator.
///
/// Injected as one mpsc channel so that shutdown and forced teardown are
/// first-class inputs for embedders and tests, not side doors;
/// [`signals`](crate::core::signals) adapts OS signals onto the same sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Advance to the next rotation value.
    Rotate,
    /// Terminate every live process gracefully and drain.
    Shutdown,
    /// Kill every live process and return without waiting for exits.
    Kill,
}

/// Runs the rotation state machine over a fixed value list.
pub struct Coordinator {
    cfg: Config,
    bus: Bus,
    runner: Runner,
    cursor: Cursor,
    registry: Registry,
    exit_rx: mpsc::Receiver<String>,
    overlap_tx: mpsc::Sender<()>,
    overlap_rx: mpsc::Receiver<()>,
    draining: bool,
}

impl Coordinator {
    /// Creates a coordinator. Child process output is streamed unmodified
    /// into `stdout`/`stderr`; diagnostics go to the bus.
    pub fn new(cfg: Config, bus: Bus, stdout: Sink, stderr: Sink) -> Self {
        let (exit_tx, exit_rx) = mpsc::channel(16);
        let (overlap_tx, overlap_rx) = mpsc::channel(4);
        let runner = Runner::new(stdout, stderr, exit_tx);
        let cursor = Cursor::new(cfg.values.clone());
        Self {
            cfg,
            bus,
            runner,
            cursor,
            registry: Registry::new(),
            exit_rx,
            overlap_tx,
            overlap_rx,
            draining: false,
        }
    }

    /// Runs until the registry drains, or until a kill control arrives.
    ///
    /// Starts the first process for slot 0 before consuming any external
    /// events; failure to start it is fatal since there is nothing to
    /// supervise. Everything after that is best-effort and reported on the
    /// bus only.
    pub async fn run(mut self, mut control: mpsc::Receiver<Control>) -> Result<(), RuntimeError> {
        self.cfg.validate()?;
        self.bus
            .publish(Event::new(EventKind::Starting).with_reason(self.cfg.summary()));

        // Synthetic first rotation: no predecessor to retire.
        let first = self.cursor.next().to_string();
        if let Err(source) = self.start(&first) {
            return Err(RuntimeError::FirstStart {
                value: first,
                source,
            });
        }
        self.cursor.advance();
        self.bus
            .publish(Event::new(EventKind::Rotated).with_value(first));

        loop {
            tokio::select! {
                Some(ctl) = control.recv() => match ctl {
                    Control::Rotate => self.handle_rotate(),
                    Control::Shutdown => self.handle_shutdown(),
                    Control::Kill => {
                        self.handle_kill();
                        return Ok(());
                    }
                },
                Some(value) = self.exit_rx.recv() => {
                    if self.handle_exit(&value) {
                        return Ok(());
                    }
                },
                Some(()) = self.overlap_rx.recv() => self.finish_rotation(),
                else => return Ok(()),
            }
        }
    }

    /// Starts a process for `value` and tracks it. Publishes
    /// `ProcessStarted` or `SpawnFailed`; does not touch the cursor.
    fn start(&mut self, value: &str) -> Result<(), SpawnError> {
        match self
            .runner
            .start(&self.cfg.command, &self.cfg.placeholder, value)
        {
            Ok(handle) => {
                self.registry.insert(value, handle);
                self.bus
                    .publish(Event::new(EventKind::ProcessStarted).with_value(value));
                Ok(())
            }
            Err(err) => {
                self.bus.publish(
                    Event::new(EventKind::SpawnFailed)
                        .with_value(value)
                        .with_reason(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// External rotate trigger: start the next slot's process and either
    /// retire the current one now (overlap = 0) or schedule the overlap.
    fn handle_rotate(&mut self) {
        let next = self.cursor.next().to_string();
        self.bus
            .publish(Event::new(EventKind::RotateRequested).with_value(next.as_str()));

        if self.draining {
            self.bus.publish(
                Event::new(EventKind::RotateConflict)
                    .with_value(next)
                    .with_reason("draining"),
            );
            return;
        }
        if self.registry.get(&next).is_some() {
            self.bus.publish(
                Event::new(EventKind::RotateConflict)
                    .with_value(next)
                    .with_reason("already running"),
            );
            return;
        }

        // Abandoned on failure: cursor and registry stay as they were, the
        // current process keeps running.
        if self.start(&next).is_err() {
            return;
        }

        if self.cfg.overlap.is_zero() {
            self.finish_rotation();
        } else {
            // Pending rotation: the cursor does not advance until the
            // overlap elapses and the replacement is re-validated as live.
            if let Some(current) = self.cursor.current() {
                self.bus.publish(
                    Event::new(EventKind::OverlapScheduled)
                        .with_value(current)
                        .with_delay(self.cfg.overlap),
                );
            }
            let overlap_tx = self.overlap_tx.clone();
            let delay = self.cfg.overlap;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = overlap_tx.send(()).await;
            });
        }
    }

    /// Commits a pending rotation: re-validate, retire current, advance.
    fn finish_rotation(&mut self) {
        let next = self.cursor.next().to_string();
        if self.registry.get(&next).is_none() {
            // The replacement already exited. A legitimate race, not an
            // error: abandon the rotation and leave the current process
            // untouched.
            self.bus
                .publish(Event::new(EventKind::RotationCanceled).with_value(next));
            return;
        }

        if let Some(current) = self.cursor.current() {
            let current = current.to_string();
            // A missing handle means the current process already exited;
            // the replacement is then the sole active one and the advance
            // still commits.
            if let Some(handle) = self.registry.get(&current) {
                match self.runner.signal(handle, SignalKind::Terminate) {
                    Ok(()) => self
                        .bus
                        .publish(Event::new(EventKind::TerminateSent).with_value(current)),
                    Err(err) => self.bus.publish(
                        Event::new(EventKind::SignalFailed)
                            .with_value(current)
                            .with_reason(err.to_string()),
                    ),
                }
            }
        }

        self.cursor.advance();
        self.bus
            .publish(Event::new(EventKind::Rotated).with_value(next));
    }

    /// A process exit was observed. Returns true when the registry drained.
    fn handle_exit(&mut self, value: &str) -> bool {
        self.registry.remove(value);
        self.bus
            .publish(Event::new(EventKind::ProcessExited).with_value(value));
        if self.registry.is_empty() {
            self.bus.publish(Event::new(EventKind::Drained));
            return true;
        }
        false
    }

    /// Shutdown trigger: terminate everything, then keep looping until the
    /// exit notifications drain the registry.
    fn handle_shutdown(&mut self) {
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.draining = true;
        self.signal_all(SignalKind::Terminate);
    }

    /// Forced teardown: kill everything; the caller returns right away
    /// without waiting for exit notifications.
    fn handle_kill(&mut self) {
        self.bus.publish(Event::new(EventKind::KillRequested));
        self.signal_all(SignalKind::Kill);
    }

    fn signal_all(&self, kind: SignalKind) {
        self.registry.for_each(|value, handle| {
            match self.runner.signal(handle, kind) {
                Ok(()) => {
                    if kind == SignalKind::Terminate {
                        self.bus
                            .publish(Event::new(EventKind::TerminateSent).with_value(value));
                    }
                }
                Err(err) => self.bus.publish(
                    Event::new(EventKind::SignalFailed)
                        .with_value(value)
                        .with_reason(err.to_string()),
                ),
            }
        });
    }
}
