use tracing_subscriber::{fmt, EnvFilter};

/// Install a `tracing` subscriber with timestamp, level and target.
///
/// `RUST_LOG` wins when set; otherwise `debug` picks DEBUG over INFO.
/// Returns `false` when a global subscriber is already installed.
pub fn init(debug: bool) -> bool {
    let fallback = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_timer(fmt::time::SystemTime)
        .with_level(true)
        .with_target(true)
        .try_init()
        .is_ok()
}
