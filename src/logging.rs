//! Logging setup
//!
//! Logs go to stderr so they never interleave with the fetch output on stdout.
//! Quiet by default: only warnings, unless -v is given or RUST_LOG is set.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given number of -v flags
pub fn filter_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("warn,quotefetch={}", level)
}

/// Initializes the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `verbosity`. Calling this twice is harmless.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
