//! Core traits for card persistence
//!
//! This module defines the trait abstraction the registry's callers use to
//! load and save card records, so the file-backed store can be swapped for an
//! in-memory one in tests.

use crate::types::AtmError;

/// Line-oriented persistence store
///
/// Loads and saves an ordered sequence of raw text lines. The store does not
/// interpret the lines in any way.
pub trait LineStore {
    /// Load every line in order
    fn load(&self) -> Result<Vec<String>, AtmError>;

    /// Replace the stored lines with `lines`
    fn save(&self, lines: &[String]) -> Result<(), AtmError>;
}
