//! Tracing set-up. Pretty output in debug builds, compact otherwise.

use tracing_subscriber::{
    fmt,
    prelude::*,
    EnvFilter,
};

/// Installs the global subscriber. `LOG_LEVEL` takes an env-filter directive
/// (e.g. `zukan=debug,reqwest=warn`); invalid or missing values fall back to
/// `info`. Calling this twice is harmless.
pub fn init_telemetry() {
    let filter = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if cfg!(debug_assertions) {
        fmt::layer().pretty().boxed()
    } else {
        fmt::layer().compact().boxed()
    };

    let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}
