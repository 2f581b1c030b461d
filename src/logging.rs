//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`; stdout stays reserved for the
//! diff output. `RUST_LOG` overrides the verbosity-derived filter.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "recdiff=warn",
        1 => "recdiff=info",
        2 => "recdiff=debug",
        _ => "recdiff=trace",
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        // A subscriber may already be installed by an embedding host.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
