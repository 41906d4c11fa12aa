//! ATM Simulator Library
//! # Overview
//!
//! This library provides an interactive ATM simulator over a small set of card
//! accounts persisted to a plain-text file.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Card, CardId, AtmError)
//! - [`cli`] - CLI arguments parsing and runtime configuration
//! - [`core`] - Business logic components:
//!   - [`core::registry`] - Cards, cash pool, authentication and transactions
//!   - [`core::traits`] - Persistence store abstraction
//! - [`io`] - Card record format and the file-backed store
//! - [`session`] - Interactive prompt loop
//! - [`logging`] - tracing subscriber setup
//!
//! # Operations
//!
//! - **Authenticate**: Open a card by number and PIN, creating it on first use
//! - **Balance**: Show the card balance
//! - **Deposit**: Put up to 1000 into a card and the machine
//! - **Withdraw**: Take cash out of a card and the machine (card checked first)
//!
//! # Card State
//!
//! Each card holds:
//! - `number`: `XXXX-XXXX-XXXX-XXXX`, compared case-insensitively, stored as entered
//! - `pin`: 1000..=9999
//! - `balance`: never driven below zero

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod session;
pub mod types;

pub use crate::core::{CardRegistry, LineStore};
pub use crate::io::FileLineStore;
pub use session::Session;
pub use types::{AtmError, Card, CardId};
