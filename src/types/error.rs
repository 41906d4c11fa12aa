//! Error types for the ATM simulator
//!
//! This module defines all error types that can occur while authenticating
//! cards, moving money and persisting the card store.
//! Messages are shown verbatim to the person at the machine.
//!
//! # Error Categories
//!
//! - **Authentication Errors**: malformed card number or PIN, wrong PIN
//! - **Transaction Errors**: deposit limit, insufficient card or machine funds
//! - **Input Errors**: non-numeric input where an integer was expected
//! - **Storage Errors**: the card store could not be read or written

use crate::types::card::CardId;
use thiserror::Error;

/// Main error type for the ATM simulator
///
/// Every variant is recoverable at the session level. Only `Io` raised while
/// loading or saving the store ends the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// Card number is not four groups of four alphanumeric characters
    #[error("Not valid number format!")]
    InvalidNumberFormat,

    /// PIN is outside the 1000..=9999 range
    #[error("Not valid pass format!")]
    InvalidPinFormat,

    /// The card exists but the PIN does not match
    ///
    /// Nothing else about the card is revealed and no state changes.
    #[error("Incorrect pass, try again!")]
    IncorrectPin,

    /// A single deposit exceeded the per-transaction cap
    #[error("You can't put more than {limit}!")]
    LimitExceeded {
        /// The cap that was exceeded
        limit: i64,
    },

    /// The card balance is lower than the requested withdrawal
    #[error("There is no such amount on card!")]
    InsufficientCardFunds,

    /// The machine holds less cash than the requested withdrawal
    #[error("There is no such amount in an ATM!")]
    InsufficientMachineFunds,

    /// Input that should have been an integer was not
    #[error("Not a number!")]
    NotANumber {
        /// The rejected input
        input: String,
    },

    /// Deposit or withdrawal amount below zero
    #[error("Amount can't be negative: {amount}")]
    NegativeAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Applying the amount would overflow a balance or the cash pool
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// A card handle that this registry never issued
    #[error("Unknown card handle {id}")]
    UnknownCard {
        /// The unknown handle
        id: CardId,
    },

    /// The card store could not be read or written
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to AtmError
impl From<std::io::Error> for AtmError {
    fn from(error: std::io::Error) -> Self {
        AtmError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl AtmError {
    /// Create a LimitExceeded error
    pub fn limit_exceeded(limit: i64) -> Self {
        AtmError::LimitExceeded { limit }
    }

    /// Create a NotANumber error
    pub fn not_a_number(input: &str) -> Self {
        AtmError::NotANumber {
            input: input.to_string(),
        }
    }

    /// Create a NegativeAmount error
    pub fn negative_amount(amount: i64) -> Self {
        AtmError::NegativeAmount { amount }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        AtmError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an UnknownCard error
    pub fn unknown_card(id: CardId) -> Self {
        AtmError::UnknownCard { id }
    }

    /// Create an Io error with the path that failed
    pub fn io(path: &std::path::Path, error: std::io::Error) -> Self {
        AtmError::Io {
            message: format!("{}: {}", path.display(), error),
        }
    }
}
