//! Logging setup
//!
//! Logs go to stderr through a compact `tracing-subscriber` fmt layer so they
//! never interleave with the prompts written to stdout.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global tracing subscriber
///
/// `filter` is an `EnvFilter` directive such as `warn` or
/// `atm_simulator=debug`. An unparsable directive falls back to
/// `DEFAULT_LOG_FILTER` with a warning on stderr.
///
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log filter '{}': {}", filter, e);
        EnvFilter::new(crate::cli::DEFAULT_LOG_FILTER)
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging("debug");
        init_logging("not a [valid filter");
        tracing::debug!("logging initialised");
    }
}
