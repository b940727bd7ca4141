//! Logging initialization

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "header=info,lib_wallet=info,lib_core=info,warn";

/// Initialize the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to `default_filter` and then
/// to [`DEFAULT_FILTER`]. Calling this twice is harmless; the second call only
/// logs that a subscriber is already installed.
pub fn init(default_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    match result {
        Ok(()) => tracing::debug!("Logging initialized"),
        Err(_) => tracing::debug!("Logging already initialized, keeping existing subscriber"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(Some("lib_core=debug"));
        init(None);
    }
}
