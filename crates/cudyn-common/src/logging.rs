use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CUDYN_LOG";

/// Initialize structured logging with environment filter.
/// Set CUDYN_LOG=debug (or trace, info, warn, error) for verbosity control.
pub fn init_logging() {
    init_logging_with("info");
}

/// Like [`init_logging`], but falls back to `default_filter` when `CUDYN_LOG`
/// is unset or unparsable. Does nothing if a global subscriber is already set.
pub fn init_logging_with(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init();
}
