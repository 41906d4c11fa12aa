// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{AtmConfig, CliArgs, DEFAULT_LOG_FILTER, DEFAULT_STORE};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Flags fall back to the `ATM_STORE`, `ATM_CASH` and `ATM_LOG` environment
/// variables, then to built-in defaults. If parsing fails (e.g. a non-numeric
/// cash amount, or `--help`), clap prints an error or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
