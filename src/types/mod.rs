//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `card`: Card records, handles and format rules
//! - `error`: Error types for the ATM simulator

pub mod card;
pub mod error;

pub use card::{is_valid_number, is_valid_pin, Card, CardId};
pub use error::AtmError;
