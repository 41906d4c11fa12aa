//! ATM Simulator CLI
//!
//! Interactive ATM backed by a plain-text card store.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --store bank/cards.txt --cash 25000
//! ATM_LOG=debug cargo run
//! ```
//!
//! The program loads the card store, runs an interactive session on
//! stdin/stdout, and writes every card back to the store when the session
//! ends.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (store unreadable or unwritable, terminal I/O failure)

use atm_simulator::cli;
use atm_simulator::core::{CardRegistry, LineStore};
use atm_simulator::io::FileLineStore;
use atm_simulator::logging::init_logging;
use atm_simulator::session::Session;
use atm_simulator::AtmError;
use std::process;
use tracing::warn;

fn main() {
    let config = cli::parse_args().to_config();
    init_logging(&config.log_filter);

    if let Some(cash) = config.clamped_cash {
        warn!(cash, "negative cash, starting with an empty machine");
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &cli::AtmConfig) -> Result<(), AtmError> {
    let store = FileLineStore::new(&config.store_path);

    let mut registry = CardRegistry::new(config.initial_cash);
    registry.load_from_lines(store.load()?);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let registry = Session::new(registry, stdin.lock(), stdout.lock()).run()?;

    store.save(&registry.dump_to_lines())
}
