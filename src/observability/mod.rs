//! Logging setup
//!
//! Structured JSON logs, one event per line, via `tracing`. Events that
//! matter operationally carry an upper-snake `event` field
//! (`ROOMS_UPSERTED`, `HOME_PAGE_DEFAULT_CREATED`, ...).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "casa_modelia=info,tower_http=info";

/// Install the global JSON subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn test_second_init_is_refused() {
        init_logging();
        assert!(!init_logging());
    }
}
