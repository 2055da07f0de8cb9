//! # OS signal plumbing.
//!
//! Adapts platform signals onto the coordinator's control channel:
//!
//! - **SIGUSR1** → [`Control::Rotate`]
//! - **SIGTERM** (programmatic terminate, e.g. a service manager) and
//!   **SIGINT** (Ctrl-C in a terminal) → [`Control::Shutdown`], treated
//!   identically
//!
//! [`Control::Kill`] has no OS binding; it exists for embedders and tests.
//!
//! On non-Unix platforms only Ctrl-C is wired (there is no rotate signal).

use tokio::sync::mpsc;

use crate::core::coordinator::Control;

/// Registers signal handlers and spawns the listener tasks that forward
/// signals onto `control`. The tasks end when the receiving side is dropped.
///
/// Returns `Err` if signal registration fails.
#[cfg(unix)]
pub fn spawn_listeners(control: mpsc::Sender<Control>) -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut usr1 = signal(SignalKind::user_defined1())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    let rotate_tx = control.clone();
    tokio::spawn(async move {
        while usr1.recv().await.is_some() {
            if rotate_tx.send(Control::Rotate).await.is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        loop {
            tokio::select! {
                s = sigint.recv() => if s.is_none() { break },
                s = sigterm.recv() => if s.is_none() { break },
            }
            if control.send(Control::Shutdown).await.is_err() {
                break;
            }
        }
    });

    Ok(())
}

/// Registers Ctrl-C as the shutdown trigger. No rotate signal exists on
/// this platform.
#[cfg(not(unix))]
pub fn spawn_listeners(control: mpsc::Sender<Control>) -> std::io::Result<()> {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if control.send(Control::Shutdown).await.is_err() {
                break;
            }
        }
    });
    Ok(())
}
