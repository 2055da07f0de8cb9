//! Rotation core: cursor, registry, process runner, and the coordinator.
//!
//! ## Wiring
//! ```text
//!  SIGUSR1 ─┐                                 ┌──► Runner.start() ──► child
//!  SIGINT  ─┼─► signals ─► mpsc<Control> ─┐   │         │
//!  SIGTERM ─┘                             ▼   │         └─ wait task ──┐
//!  (tests: Control::Kill) ──────────► Coordinator ◄── mpsc<exit value> ┘
//!                                     │   ▲
//!                                     │   └── mpsc<overlap fired> ◄─ sleep task
//!                                     └──► Bus (events out)
//! ```
//!
//! The coordinator is the sole owner and mutator of the [`Cursor`] and
//! [`Registry`]; every other task only produces messages into its channels.
//!
//! Internal modules:
//! - [`cursor`]: position in the fixed rotation list;
//! - [`registry`]: value → live process handle bookkeeping;
//! - [`runner`]: placeholder substitution, spawning, output pumps, signaling;
//! - [`coordinator`]: the rotation/overlap/drain state machine;
//! - [`signals`]: OS signal → control channel plumbing.

mod coordinator;
mod cursor;
mod registry;
mod runner;
pub mod signals;

pub use coordinator::{Control, Coordinator};
pub use cursor::Cursor;
pub use registry::{ProcHandle, Registry};
pub use runner::{Runner, SignalKind, Sink, sink};
