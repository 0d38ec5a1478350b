//! Diagnostic logging
//!
//! Status lines are printed by [`crate::ui`]; this module only sets up the
//! `tracing` subscriber used for debug output on stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a verbosity level
fn default_directive(verbose: bool) -> &'static str {
    if verbose { "guru=debug" } else { "guru=warn" }
}

/// Initialize the logging system
///
/// `RUST_LOG` overrides the level picked from `verbose`.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
