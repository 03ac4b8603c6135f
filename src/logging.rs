//! Diagnostic logging via `tracing`
//!
//! User-facing progress is printed directly by the commands. This subscriber
//! only carries diagnostics, written to stderr so `--json` output on stdout
//! stays clean.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` count picks the level for this crate.
pub fn init(verbosity: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

  // Ignore a second init (tests may call this more than once)
  let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}

fn default_directive(verbosity: u8) -> String {
  let level = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };
  format!("cargo_fleet={}", level)
}
