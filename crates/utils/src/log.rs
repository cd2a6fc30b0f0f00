//! Tracing subscriber setup shared by every binary in the workspace.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directives` is used
/// (for example `"server=info,services=info,tower_http=debug"`).
/// Calling this twice is harmless: the second install is ignored.
pub fn init_tracing(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
