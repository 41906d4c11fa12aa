//! Card-related types for the ATM simulator
//!
//! This module defines the Card record, the handle the registry hands out
//! for it, and the format rules for card numbers and PINs.

use std::fmt;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Separator between the four groups of a card number
pub const NUMBER_SEPARATOR: char = '-';

/// Number of groups in a card number
pub const NUMBER_GROUPS: usize = 4;

/// Number of characters in each card number group
pub const GROUP_LEN: usize = 4;

/// Smallest accepted PIN
pub const MIN_PIN: i32 = 1000;

/// Largest accepted PIN
pub const MAX_PIN: i32 = 9999;

/// Handle to a card owned by a `CardRegistry`
///
/// Cards are never removed from a registry, so a handle stays valid for the
/// registry's whole lifetime. Handles from one registry mean nothing to
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub usize);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card account
///
/// The number is kept exactly as it was entered or loaded; comparisons and
/// display use the canonical uppercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    number: String,
    pin: i32,
    balance: i64,
}

impl Card {
    /// Create a new card with a zero balance
    pub fn new(number: impl Into<String>, pin: i32) -> Self {
        Self::with_balance(number, pin, 0)
    }

    /// Create a card with an existing balance (used when loading the store)
    pub fn with_balance(number: impl Into<String>, pin: i32, balance: i64) -> Self {
        Card {
            number: number.into(),
            pin,
            balance,
        }
    }

    /// Canonical (uppercase) card number
    pub fn number(&self) -> String {
        self.number.to_uppercase()
    }

    /// Card number exactly as stored
    pub fn raw_number(&self) -> &str {
        &self.number
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub(crate) fn pin(&self) -> i32 {
        self.pin
    }

    pub(crate) fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    /// Check a PIN against the one stored on the card
    pub fn pin_matches(&self, pin: i32) -> bool {
        self.pin == pin
    }

    /// Whether two cards refer to the same account
    ///
    /// Numbers are compared in canonical form, so `aaaa-...` and `AAAA-...`
    /// are the same card.
    pub fn same_number(&self, other: &Card) -> bool {
        self.number() == other.number()
    }

    /// Both the number and the PIN are well-formed
    pub fn is_valid(&self) -> bool {
        is_valid_number(&self.number) && is_valid_pin(self.pin)
    }
}

/// Check a card number against the `XXXX-XXXX-XXXX-XXXX` format
///
/// Every `X` must be a letter or a decimal digit (Unicode letters and digits
/// count). Any other character, a wrong group count or a wrong group length
/// makes the number invalid. Trailing empty groups are ignored, so a single
/// trailing `-` is accepted.
pub fn is_valid_number(number: &str) -> bool {
    let mut groups: Vec<&str> = number.split(NUMBER_SEPARATOR).collect();
    while groups.last() == Some(&"") {
        groups.pop();
    }
    if groups.len() != NUMBER_GROUPS {
        return false;
    }

    groups.iter().all(|group| {
        group.chars().count() == GROUP_LEN && group.chars().all(is_letter_or_digit)
    })
}

/// Letter (`Lu`, `Ll`, `Lt`, `Lm`, `Lo`) or decimal digit (`Nd`)
///
/// Narrower than `char::is_alphanumeric`: superscripts, fractions, roman
/// numerals and combining marks are rejected.
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Check that a PIN lies in `MIN_PIN..=MAX_PIN`
pub fn is_valid_pin(pin: i32) -> bool {
    (MIN_PIN..=MAX_PIN).contains(&pin)
}
