//! Error types used by the rotavisor runtime.
//!
//! The taxonomy mirrors the failure policy of the coordinator:
//!
//! - [`RuntimeError`] — the only error that escapes [`Coordinator::run`]
//!   (invalid configuration, or the very first process failing to start).
//! - [`SpawnError`] — a process failed to launch. Fatal for the first start,
//!   recoverable afterwards (the rotation attempt is abandoned and reported
//!   as an event).
//! - [`SignalError`] — a terminate/kill signal could not be delivered.
//!   Never escalated; reported as an event and otherwise ignored.
//!
//! [`Coordinator::run`]: crate::Coordinator::run

use thiserror::Error;

/// Configuration validation errors.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The rotation list has no values.
    #[error("rotation value list is empty")]
    EmptyValues,

    /// The command template is empty.
    #[error("command template is empty")]
    EmptyCommand,

    /// The overlap duration string could not be parsed, or was negative.
    #[error("invalid overlap duration: {0:?}")]
    InvalidOverlap(String),
}

/// Failure to launch a process for a rotation value.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SpawnError {
    /// The command template substituted down to an empty argv.
    #[error("command is empty after placeholder substitution")]
    EmptyCommand,

    /// The OS refused to spawn the process (missing executable, permissions, ...).
    #[error("spawn failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to deliver a signal to a supervised process.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SignalError {
    /// The handle carries no addressable OS pid (process already reaped).
    #[error("process has no addressable pid")]
    NoPid,

    /// The kill(2) call itself failed.
    #[cfg(unix)]
    #[error("kill failed: {0}")]
    Os(#[from] nix::errno::Errno),

    /// Signal delivery is not supported on this platform.
    #[cfg(not(unix))]
    #[error("signal delivery is not supported on this platform")]
    Unsupported,
}

/// # Errors produced by the rotavisor runtime.
///
/// Everything else (later spawn failures, signal failures, race-induced
/// no-ops) is handled inside the coordinator and surfaces only as events.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The very first process failed to start; there is nothing to supervise.
    #[error("failed to start first process for value {value:?}: {source}")]
    FirstStart {
        /// The rotation value the first start was attempted with.
        value: String,
        /// The underlying spawn failure.
        #[source]
        source: SpawnError,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Config(_) => "invalid_config",
            RuntimeError::FirstStart { .. } => "first_start_failed",
        }
    }
}
