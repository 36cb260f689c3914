//! Diagnostic logging
//!
//! Structured events go to stderr through a `tracing-subscriber` fmt layer.
//! The filter defaults to `warn`. `KBD_RGB_LOG` overrides it, but only for a
//! process that is not running with elevated privileges.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::security::Identity;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "KBD_RGB_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive for this process
pub fn filter_for(identity: &Identity) -> EnvFilter {
    if identity.is_elevated() {
        return EnvFilter::new(DEFAULT_FILTER);
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(identity: &Identity) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter_for(identity))
        .with(fmt_layer)
        .try_init();
}
