//! Diagnostic logging to stderr.

use std::io;

use iamreader_config::DEFAULT_LOG_LEVEL;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Picks the filter directive used when `RUST_LOG` is not set.
///
/// `--debug` wins over the configured level, and an empty level falls back to `info`.
pub fn filter_directive(debug: bool, configured: &str) -> String {
    if debug {
        "debug".to_string()
    } else if configured.trim().is_empty() {
        DEFAULT_LOG_LEVEL.to_string()
    } else {
        configured.trim().to_string()
    }
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over both arguments. A second call only prints a warning.
pub fn init(debug: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = filter_directive(debug, configured);
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    });

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
        .is_err()
    {
        eprintln!("warning: logging was already initialized");
    }
}
