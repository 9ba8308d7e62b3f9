// src/logging.rs
//! Log output setup

use crate::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a stderr formatter.
///
/// An explicit `--log-level` filter wins, then `RUST_LOG`, then the
/// configured filter.
pub fn init(explicit: Option<&str>, configured: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(explicit, configured))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Pick the first filter that parses; unparsable ones fall through
fn build_filter(explicit: Option<&str>, configured: &str) -> EnvFilter {
    explicit
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filter_wins() {
        // Holds whether or not RUST_LOG is set in the test environment
        let filter = build_filter(Some("survey_area=trace"), DEFAULT_LOG_FILTER);
        assert_eq!(filter.to_string(), "survey_area=trace");
    }

    #[test]
    fn test_unparsable_explicit_filter_falls_through() {
        let filter = build_filter(Some("survey_area=loud"), "survey_area=warn");
        let expected = std::env::var("RUST_LOG")
            .ok()
            .and_then(|v| EnvFilter::try_new(v).ok())
            .map(|f| f.to_string())
            .unwrap_or_else(|| "survey_area=warn".to_string());
        assert_eq!(filter.to_string(), expected);
    }
}
