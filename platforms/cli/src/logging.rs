//! Diagnostic tracing for the CLI.
//!
//! The interpreter emits `tracing` events (rule applications at `trace`, halts at `debug`,
//! divergence and rule warnings at `warn`). They go to stderr so stdout stays reserved for
//! program output.

use std::io;

use tracing_subscriber::EnvFilter;

/// Target of the interpreter library's events.
const INTERPRETER_TARGET: &str = "markov";

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only interpreter events are shown, at `warn`, or at
/// `debug` when `verbose` is set.
///
/// # Example
/// ```bash
/// RUST_LOG=markov=trace markov-cli demos/sort-ab.markov
/// ```
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", INTERPRETER_TARGET, level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
