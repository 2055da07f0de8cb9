//! # Process runner: substitute, spawn, stream output, report exit, signal.
//!
//! [`Runner::start`] substitutes the rotation value into the command
//! template, splits it into an argv on whitespace, and spawns the process
//! without blocking. Two pump tasks copy the child's stdout/stderr into the
//! caller-supplied sinks unmodified, and a wait task sends the originating
//! value on the exit channel exactly once after the process dies — however
//! it dies. A start failure is reported synchronously and produces no exit
//! notification.
//!
//! [`Runner::signal`] delivers a [`SignalKind`] to a handle by pid
//! (SIGTERM/SIGKILL on Unix). The tokio `Child` is owned by the wait task,
//! so signaling goes through the OS, same as the original supervisor
//! signaled `cmd.Process`.

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::{Mutex, mpsc};

use crate::core::registry::ProcHandle;
use crate::error::{SignalError, SpawnError};

/// Shared output sink. Overlapping processes interleave into the same sink,
/// each write holding the lock only for one chunk.
pub type Sink = Arc<Mutex<Box<dyn AsyncWrite + Send + Unpin>>>;

/// Wraps a writer into a [`Sink`].
pub fn sink<W>(writer: W) -> Sink
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    Arc::new(Mutex::new(Box::new(writer)))
}

/// The closed set of signals the coordinator can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    /// Graceful termination (SIGTERM).
    Terminate,
    /// Immediate kill (SIGKILL).
    Kill,
}

/// Spawns supervised processes and signals them.
pub struct Runner {
    stdout: Sink,
    stderr: Sink,
    exit_tx: mpsc::Sender<String>,
}

impl Runner {
    /// Creates a runner writing child output to the given sinks and exit
    /// notifications to `exit_tx`.
    pub fn new(stdout: Sink, stderr: Sink, exit_tx: mpsc::Sender<String>) -> Self {
        Self {
            stdout,
            stderr,
            exit_tx,
        }
    }

    /// Substitutes `value` into `template` and starts the process.
    ///
    /// Returns as soon as the process is launched. On success, an exit
    /// notification carrying `value` will arrive on the exit channel exactly
    /// once, whenever the process dies.
    pub fn start(
        &self,
        template: &str,
        placeholder: &str,
        value: &str,
    ) -> Result<ProcHandle, SpawnError> {
        let argv = build_argv(template, placeholder, value)?;
        let mut child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let pid = child.id();
        if let Some(out) = child.stdout.take() {
            pump(out, Arc::clone(&self.stdout));
        }
        if let Some(err) = child.stderr.take() {
            pump(err, Arc::clone(&self.stderr));
        }

        let exit_tx = self.exit_tx.clone();
        let value = value.to_string();
        tokio::spawn(async move {
            // The exit status itself is irrelevant to rotation; only the
            // fact of the exit is.
            let _ = child.wait().await;
            let _ = exit_tx.send(value).await;
        });

        Ok(ProcHandle::new(pid))
    }

    /// Delivers `kind` to the process behind `handle`. Fire-and-forget:
    /// errors mean the handle is not addressable or the OS call failed.
    #[cfg(unix)]
    pub fn signal(&self, handle: &ProcHandle, kind: SignalKind) -> Result<(), SignalError> {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let pid = handle.pid().ok_or(SignalError::NoPid)?;
        let sig = match kind {
            SignalKind::Terminate => Signal::SIGTERM,
            SignalKind::Kill => Signal::SIGKILL,
        };
        kill(Pid::from_raw(pid as i32), sig)?;
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn signal(&self, _handle: &ProcHandle, _kind: SignalKind) -> Result<(), SignalError> {
        Err(SignalError::Unsupported)
    }
}

/// Substitutes the first placeholder occurrence and splits on whitespace.
fn build_argv(template: &str, placeholder: &str, value: &str) -> Result<Vec<String>, SpawnError> {
    let line = if placeholder.is_empty() {
        template.to_string()
    } else {
        template.replacen(placeholder, value, 1)
    };
    let argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if argv.is_empty() {
        return Err(SpawnError::EmptyCommand);
    }
    Ok(argv)
}

/// Copies a child stream into a shared sink, chunk by chunk.
fn pump(mut reader: impl AsyncRead + Send + Unpin + 'static, sink: Sink) {
    tokio::spawn(async move {
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    let mut w = sink.lock().await;
                    if w.write_all(&buf[..n]).await.is_err() {
                        break;
                    }
                    let _ = w.flush().await;
                }
            }
        }
    });
}
