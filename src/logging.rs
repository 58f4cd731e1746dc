//! Logging bootstrap
//!
//! Installs a `tracing-subscriber` fmt layer writing to stderr so command
//! output on stdout stays clean. `RUST_LOG` wins when set; otherwise the
//! configured level applies to this crate and dependencies stay at `warn`.

use tracing_subscriber::EnvFilter;

/// Build the default filter directive for a level, e.g. `warn,quadrant_tasks=info`
pub fn default_directive(level: &str) -> String {
    format!("warn,quadrant_tasks={}", level.trim().to_lowercase())
}

/// Initialize the global subscriber; repeated calls are ignored
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    // A subscriber may already be installed (tests, embedding applications)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
