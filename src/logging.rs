/// Tracing setup. Logs go to stderr so stdout stays clean for rendered output.
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// Reads `RUST_LOG` at call time, so a value loaded from `.env` applies.
pub fn init(debug: bool) {
    let filter = build_filter(debug, std::env::var("RUST_LOG").ok().as_deref());

    // A second init (tests) is harmless.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `rust_log` wins when it parses; otherwise only warnings are shown, or this
/// crate's debug events with `--debug`.
fn build_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    let default_directive = if debug { "bank_connector=debug" } else { "warn" };
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(build_filter(false, None).to_string(), "warn");
        assert_eq!(build_filter(true, None).to_string(), "bank_connector=debug");
    }

    #[test]
    fn test_rust_log_overrides_debug_flag() {
        let filter = build_filter(false, Some("bank_connector=trace"));
        assert_eq!(filter.to_string(), "bank_connector=trace");
        let filter = build_filter(true, Some("error"));
        assert_eq!(filter.to_string(), "error");
    }

    #[test]
    fn test_unusable_rust_log_falls_back() {
        assert_eq!(build_filter(false, Some("  ")).to_string(), "warn");
        assert_eq!(
            build_filter(true, Some("bank_connector=loud")).to_string(),
            "bank_connector=debug"
        );
    }
}
