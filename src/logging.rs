//! Tracing subscriber setup.
//!
//! Filtering follows `RUST_LOG` and defaults to `warn`. The TUI logs to a file
//! because stderr shares the terminal with the alternate screen.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log lines go.
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber. Failures are reported and otherwise ignored.
pub fn init_logging(target: LogTarget) {
    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init(),
                Err(e) => {
                    eprintln!("Failed to open log file {}: {e}", path.display());
                    return;
                }
            }
        }
    };
    if let Err(e) = result {
        eprintln!("Failed to initialise logging: {e}");
    }
}
