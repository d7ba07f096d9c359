//! Logging setup.
//!
//! Logs go to stderr so stdout only ever carries command output, which keeps
//! `shortutil wordlist words.txt > rainbow.txt` clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "SHORTUTIL_LOG";

/// Default filter directive for a given `-v` count.
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "shortutil=warn",
        1 => "shortutil=info",
        2 => "shortutil=debug",
        _ => "shortutil=trace",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_levels() {
        assert_eq!(default_directive(0), "shortutil=warn");
        assert_eq!(default_directive(1), "shortutil=info");
        assert_eq!(default_directive(2), "shortutil=debug");
        assert_eq!(default_directive(3), "shortutil=trace");
        assert_eq!(default_directive(u8::MAX), "shortutil=trace");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(0);
        init(2);
    }
}
