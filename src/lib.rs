//! # rotavisor
//!
//! **Rotavisor** is a process-rotation supervisor: it runs a templated
//! command repeatedly, substituting the next value from a fixed rotation
//! list each time a rotate trigger fires, and retires the previously running
//! process only after a configurable overlap delay. The overlap gives a
//! listening server time to migrate addresses, keys, or sockets before its
//! predecessor goes away.
//!
//! ## Architecture
//! ```text
//!  SIGUSR1 ──┐
//!  SIGINT  ──┼──► signals ──► mpsc<Control> ──┐
//!  SIGTERM ──┘   (adapter)                    ▼
//!                                   ┌──────────────────┐
//!                  overlap timer ──►│   Coordinator    │──► Runner.start()
//!                  (sleep task)     │  - Cursor        │         │
//!                                   │  - Registry      │    child process
//!                  exit notices ───►│  (sole mutator)  │         │
//!                  (wait tasks)     └────────┬─────────┘◄── wait task sends
//!                                            │               exit value
//!                                            ▼
//!                                           Bus ──► SubscriberSet ──► LogWriter
//! ```
//!
//! The coordinator is a single sequential event loop; everything concurrent
//! (spawned processes, overlap sleeps, signal streams) only produces
//! messages into its channels. The [`Cursor`] tracks the position in the
//! rotation list and the [`Registry`] tracks which values currently have a
//! live process; at most two are tracked at once (current and its
//! replacement during an overlap window).
//!
//! ## Lifecycle
//! ```text
//! start value[0] ──► Single-Active ──rotate──► Overlapping ──overlap──► Single-Active
//!                         │                        │ replacement died
//!                         │                        └────────► rotation canceled
//!                         ├─ shutdown ──► Draining ──all exited──► return
//!                         └─ kill ──► return immediately
//! ```
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use tokio_util::sync::CancellationToken;
//! use rotavisor::{Bus, Config, Coordinator, LogWriter, Subscribe, SubscriberSet, sink};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config {
//!         command: "myserver 127.0.0.1:%alt".into(),
//!         placeholder: "%alt".into(),
//!         values: vec!["3000".into(), "3001".into()],
//!         overlap: Duration::from_secs(10),
//!     };
//!
//!     let bus = Bus::new(256);
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let token = CancellationToken::new();
//!     Arc::new(SubscriberSet::new(subs)).spawn_listener(&bus, token.clone());
//!
//!     let (control_tx, control_rx) = mpsc::channel(8);
//!     rotavisor::signals::spawn_listeners(control_tx)?;
//!
//!     let coordinator = Coordinator::new(
//!         cfg,
//!         bus.clone(),
//!         sink(tokio::io::stdout()),
//!         sink(tokio::io::stderr()),
//!     );
//!     let result = coordinator.run(control_rx).await;
//!     token.cancel();
//!     Ok(result?)
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use config::{Config, DEFAULT_PLACEHOLDER, parse_duration};
pub use core::signals;
pub use core::{Control, Coordinator, Cursor, ProcHandle, Registry, Runner, SignalKind, Sink, sink};
pub use error::{ConfigError, RuntimeError, SignalError, SpawnError};
pub use events::{Bus, Event, EventKind};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
