//! Card registry module
//!
//! This module provides the `CardRegistry` struct which owns every known card
//! and the machine's cash pool.
//!
//! The CardRegistry is responsible for:
//! - Loading cards from persisted record lines (invalid lines are skipped)
//! - Authenticating cards, creating them on first valid use
//! - Deposits and withdrawals that move card balance and cash pool together
//! - Dumping cards back to record lines in first-seen order

use crate::io::record_format::{parse_card, serialize_card};
use crate::types::{is_valid_number, is_valid_pin, AtmError, Card, CardId};
use tracing::{debug, info};

/// Largest amount accepted by a single deposit
pub const DEPOSIT_LIMIT: i64 = 1000;

/// Default cash pool of a freshly installed machine
pub const DEFAULT_CASH: i64 = 10_000;

/// Owns all cards and the machine's cash pool
///
/// Cards are kept in first-seen order, which is also the order they are
/// written back in. Cards are never removed, so `CardId` handles stay valid.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    /// All known cards in first-seen order
    cards: Vec<Card>,

    /// Cash available in the machine
    total_cash: i64,
}

impl CardRegistry {
    /// Create an empty registry with the given cash pool
    ///
    /// # Arguments
    ///
    /// * `total_cash` - Cash initially available in the machine
    pub fn new(total_cash: i64) -> Self {
        CardRegistry {
            cards: Vec::new(),
            total_cash,
        }
    }

    /// Load cards from persisted record lines
    ///
    /// Each line is parsed and kept only if both its number and PIN are
    /// well-formed. Lines that fail either step are dropped without an error;
    /// stores may be hand-edited or partially corrupt.
    ///
    /// # Arguments
    ///
    /// * `lines` - Record lines as returned by a `LineStore`
    ///
    /// # Returns
    ///
    /// The number of cards appended
    pub fn load_from_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loaded = 0;
        let mut skipped = 0;

        for line in lines {
            let line = line.as_ref();
            match parse_card(line).filter(Card::is_valid) {
                Some(card) => {
                    self.cards.push(card);
                    loaded += 1;
                }
                None => {
                    debug!(line, "skipping invalid card record");
                    skipped += 1;
                }
            }
        }

        info!(loaded, skipped, "loaded card records");
        loaded
    }

    /// Serialize every card in first-seen order
    pub fn dump_to_lines(&self) -> Vec<String> {
        self.cards.iter().map(serialize_card).collect()
    }

    /// Authenticate a card, creating it if the number is unknown
    ///
    /// # Arguments
    ///
    /// * `number` - Card number as entered; compared in uppercase form
    /// * `pin` - PIN as entered
    ///
    /// # Returns
    ///
    /// * `Ok(CardId)` - Handle to the existing or newly created card
    /// * `Err(AtmError)` - The number or PIN is malformed, or the PIN is wrong
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `InvalidNumberFormat` if the number is not `XXXX-XXXX-XXXX-XXXX`
    /// - `InvalidPinFormat` if the PIN is outside 1000..=9999
    /// - `IncorrectPin` if the card exists with a different PIN; no state changes
    pub fn authenticate_or_create(&mut self, number: &str, pin: i32) -> Result<CardId, AtmError> {
        let candidate = Card::new(number, pin);

        if !is_valid_number(number) {
            return Err(AtmError::InvalidNumberFormat);
        }
        if !is_valid_pin(pin) {
            return Err(AtmError::InvalidPinFormat);
        }

        if let Some(index) = self.cards.iter().position(|c| c.same_number(&candidate)) {
            if self.cards[index].pin_matches(pin) {
                return Ok(CardId(index));
            }
            debug!(number = %candidate.number(), "incorrect pin");
            return Err(AtmError::IncorrectPin);
        }

        info!(number = %candidate.number(), "created card");
        self.cards.push(candidate);
        Ok(CardId(self.cards.len() - 1))
    }

    /// Deposit cash into a card
    ///
    /// Increases both the card balance and the machine's cash pool.
    ///
    /// # Arguments
    ///
    /// * `id` - Handle returned by `authenticate_or_create`
    /// * `amount` - Amount to deposit
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The handle is unknown
    /// - The amount is negative
    /// - The amount exceeds `DEPOSIT_LIMIT`
    /// - Either the balance or the cash pool would overflow
    pub fn deposit(&mut self, id: CardId, amount: i64) -> Result<(), AtmError> {
        let balance = self.card_or_err(id)?.balance();

        if amount < 0 {
            return Err(AtmError::negative_amount(amount));
        }
        if amount > DEPOSIT_LIMIT {
            return Err(AtmError::limit_exceeded(DEPOSIT_LIMIT));
        }

        let new_balance = balance
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("deposit"))?;
        let new_cash = self
            .total_cash
            .checked_add(amount)
            .ok_or_else(|| AtmError::arithmetic_overflow("deposit"))?;

        self.apply(id, new_balance, new_cash);
        debug!(card = %id, amount, balance = new_balance, cash = new_cash, "deposit");
        Ok(())
    }

    /// Withdraw cash from a card
    ///
    /// Decreases both the card balance and the machine's cash pool. The card
    /// balance is checked before the cash pool, so when both are short the
    /// caller sees `InsufficientCardFunds`.
    ///
    /// # Arguments
    ///
    /// * `id` - Handle returned by `authenticate_or_create`
    /// * `amount` - Amount to withdraw
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The handle is unknown
    /// - The amount is negative
    /// - The card balance is lower than the amount
    /// - The cash pool is lower than the amount
    pub fn withdraw(&mut self, id: CardId, amount: i64) -> Result<(), AtmError> {
        let balance = self.card_or_err(id)?.balance();

        if amount < 0 {
            return Err(AtmError::negative_amount(amount));
        }
        if balance < amount {
            return Err(AtmError::InsufficientCardFunds);
        }
        if self.total_cash < amount {
            return Err(AtmError::InsufficientMachineFunds);
        }

        // Both operands are >= amount >= 0, so neither subtraction underflows
        let new_balance = balance - amount;
        let new_cash = self.total_cash - amount;

        self.apply(id, new_balance, new_cash);
        debug!(card = %id, amount, balance = new_balance, cash = new_cash, "withdraw");
        Ok(())
    }

    /// Look up a card by handle
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    /// All cards in first-seen order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cash currently available in the machine
    pub fn total_cash(&self) -> i64 {
        self.total_cash
    }

    fn card_or_err(&self, id: CardId) -> Result<&Card, AtmError> {
        self.card(id).ok_or_else(|| AtmError::unknown_card(id))
    }

    fn apply(&mut self, id: CardId, balance: i64, total_cash: i64) {
        if let Some(card) = self.cards.get_mut(id.0) {
            card.set_balance(balance);
            self.total_cash = total_cash;
        }
    }
}

impl Default for CardRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CASH)
    }
}
