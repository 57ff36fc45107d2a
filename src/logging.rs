//! Logging setup.
//!
//! Priority: RUST_LOG env var > `--debug` flag > default "info".
//! Output goes to stderr so stdout stays free for `--summary` JSON.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialise the global tracing subscriber.
pub fn init(debug_flag: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
}
