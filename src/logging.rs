// Logging setup: one fmt subscriber on stderr, filtered by `RUST_LOG`.

use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset. Anything chattier than `warn` would
/// interleave with the interactive menus.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global tracing subscriber, writing to stderr.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: tracing init failed: {e}");
    }
}
