//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TASKSENSE_LOG";

/// Returns the filter directive used when [`LOG_ENV`] is unset.
#[must_use]
pub const fn default_directive(production: bool) -> &'static str {
    if production {
        "info,tower_http=info"
    } else {
        "debug,tower_http=debug"
    }
}

/// Installs the global subscriber.
///
/// Reads [`LOG_ENV`] and falls back to [`default_directive`]. Calling this
/// twice leaves the first subscriber in place.
pub fn init(production: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(production)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
