use crate::core::registry::DEFAULT_CASH;
use clap::Parser;
use std::path::PathBuf;

/// Default location of the card store
pub const DEFAULT_STORE: &str = "cards.txt";

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Interactive ATM simulator backed by a plain-text card store
#[derive(Parser, Debug)]
#[command(name = "atm")]
#[command(about = "Interactive ATM simulator backed by a plain-text card store", long_about = None)]
pub struct CliArgs {
    /// Card store file, one `<number> <pin> <balance>` record per line
    #[arg(
        long = "store",
        value_name = "PATH",
        env = "ATM_STORE",
        default_value = DEFAULT_STORE,
        help = "Path to the card store file"
    )]
    pub store: PathBuf,

    /// Cash available in the machine at startup
    #[arg(
        long = "cash",
        value_name = "AMOUNT",
        env = "ATM_CASH",
        default_value_t = DEFAULT_CASH,
        allow_negative_numbers = true,
        help = "Cash available in the machine at startup (default: 10000)"
    )]
    pub cash: i64,

    /// Tracing filter directive, e.g. `info` or `atm_simulator=debug`
    #[arg(
        long = "log-level",
        value_name = "FILTER",
        env = "ATM_LOG",
        default_value = DEFAULT_LOG_FILTER,
        help = "Log filter written to stderr (default: warn)"
    )]
    pub log_level: String,
}

/// Runtime configuration assembled from CLI arguments and environment
#[derive(Debug, Clone, PartialEq)]
pub struct AtmConfig {
    pub store_path: PathBuf,
    pub initial_cash: i64,
    pub log_filter: String,
    /// Requested cash amount when it was negative and clamped to zero
    pub clamped_cash: Option<i64>,
}

impl CliArgs {
    /// Create an AtmConfig from CLI arguments
    ///
    /// A negative cash amount is clamped to zero and recorded in
    /// `clamped_cash`, so the caller can warn once logging is up.
    pub fn to_config(&self) -> AtmConfig {
        let clamped_cash = (self.cash < 0).then_some(self.cash);

        AtmConfig {
            store_path: self.store.clone(),
            initial_cash: self.cash.max(0),
            log_filter: self.log_level.clone(),
            clamped_cash,
        }
    }
}
