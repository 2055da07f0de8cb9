//! Command-line entry point.
//!
//! Parses arguments into a [`Config`], wires OS signals onto the control
//! channel, and runs the coordinator with child output streamed to this
//! process's stdout/stderr and diagnostics to stderr.
//!
//! ```text
//! rotavisor "myserver 127.0.0.1:%alt" 3000 3001 --overlap 10s
//! ```
//!
//! Send SIGUSR1 to rotate, SIGTERM or Ctrl-C to drain and exit.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use rotavisor::{
    Bus, Config, Coordinator, DEFAULT_PLACEHOLDER, LogWriter, Subscribe, SubscriberSet,
    parse_duration, signals, sink,
};

#[derive(Parser, Debug)]
#[command(
    name = "rotavisor",
    version,
    about = "Run a templated command with rotating values and graceful overlap handoff",
    after_help = "Send SIGUSR1 to rotate to the next value. SIGTERM or Ctrl-C \
                  terminates every supervised process and exits once they are gone."
)]
struct Cli {
    /// Command to run, with the placeholder standing in for the rotated value.
    command: String,

    /// Values to rotate through, in order, one per SIGUSR1.
    #[arg(required = true)]
    values: Vec<String>,

    /// Delay between starting the next command and sending SIGTERM to the
    /// previous one (e.g. "10s", "500ms").
    #[arg(long, default_value = "0", value_parser = parse_overlap)]
    overlap: Duration,

    /// Placeholder token substituted in the command template.
    #[arg(long, default_value = DEFAULT_PLACEHOLDER)]
    placeholder: String,
}

fn parse_overlap(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = Config {
        command: cli.command,
        placeholder: cli.placeholder,
        values: cli.values,
        overlap: cli.overlap,
    };
    if let Err(err) = cfg.validate() {
        eprintln!("rotavisor: {err}");
        return ExitCode::from(2);
    }

    let bus = Bus::new(256);
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let log_token = CancellationToken::new();
    Arc::new(SubscriberSet::new(subs)).spawn_listener(&bus, log_token.clone());

    let (control_tx, control_rx) = mpsc::channel(8);
    if let Err(err) = signals::spawn_listeners(control_tx) {
        eprintln!("rotavisor: failed to register signal handlers: {err}");
        return ExitCode::FAILURE;
    }

    let coordinator = Coordinator::new(
        cfg,
        bus.clone(),
        sink(tokio::io::stdout()),
        sink(tokio::io::stderr()),
    );
    let result = coordinator.run(control_rx).await;

    // Let the log listener flush buffered events before exiting.
    log_token.cancel();
    tokio::task::yield_now().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("rotavisor: {err}");
            ExitCode::FAILURE
        }
    }
}
