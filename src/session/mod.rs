//! Interactive ATM session
//!
//! Drives a `CardRegistry` from line-oriented input: the user enters a card
//! number and PIN, performs one operation on the card, and decides whether to
//! continue. Input and output are generic so the same loop runs on the
//! terminal and on scripted buffers in tests.
//!
//! # Operations
//!
//! - `sum` - print the card balance
//! - `add` - deposit an amount
//! - `remove` - withdraw an amount
//! - `exit` (or anything else) - leave the card without an operation
//!
//! Every error is printed as a single line and the loop carries on. End of
//! input ends the session as if the user had answered "yes" to the exit
//! prompt. Input that is not valid UTF-8 is decoded lossily and then
//! rejected like any other malformed answer.

use crate::core::CardRegistry;
use crate::types::{AtmError, CardId};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

const SEPARATOR: &str = "-------------------------------";
const CARD_NUMBER_PROMPT: &str = "Enter card number: ";
const CARD_PIN_PROMPT: &str = "Enter card pass: ";
const OPERATION_PROMPT: &str = "Enter operation (sum, add, remove, exit): ";
const DEPOSIT_PROMPT: &str = "Enter sum for add: ";
const WITHDRAW_PROMPT: &str = "Enter sum for remove: ";
const EXIT_PROMPT: &str = "Exit? (\"yes\" or enter for continue) ";
const EXIT_ANSWER: &str = "yes";

/// Operation chosen for an authenticated card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Balance,
    Deposit,
    Withdraw,
    Leave,
}

impl Operation {
    /// Map a menu command to an operation; unknown commands leave the card
    pub fn from_command(command: &str) -> Self {
        match command {
            "sum" => Operation::Balance,
            "add" => Operation::Deposit,
            "remove" => Operation::Withdraw,
            _ => Operation::Leave,
        }
    }
}

/// Interactive session over a card registry
///
/// # Examples
///
/// ```
/// use atm_simulator::core::CardRegistry;
/// use atm_simulator::session::Session;
///
/// let input = "AAAA-BBBB-1111-2222\n4321\nadd\n500\nyes\n";
/// let mut output = Vec::new();
///
/// let registry = Session::new(CardRegistry::new(10_000), input.as_bytes(), &mut output)
///     .run()
///     .unwrap();
///
/// assert_eq!(registry.dump_to_lines(), vec!["AAAA-BBBB-1111-2222 4321 500"]);
/// ```
pub struct Session<R, W> {
    registry: CardRegistry,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(registry: CardRegistry, input: R, output: W) -> Self {
        Session {
            registry,
            input,
            output,
        }
    }

    /// Run the session until the user exits or input ends
    ///
    /// # Returns
    ///
    /// * `Ok(CardRegistry)` - The registry with all in-session changes, ready to save
    /// * `Err(AtmError::Io)` - Reading input or writing output failed
    pub fn run(mut self) -> Result<CardRegistry, AtmError> {
        loop {
            if !self.serve_card()? {
                break;
            }

            match self.prompt(EXIT_PROMPT)? {
                Some(answer) if answer.to_lowercase() != EXIT_ANSWER => continue,
                _ => break,
            }
        }

        self.output.flush()?;
        Ok(self.registry)
    }

    /// Authenticate one card and perform one operation on it
    ///
    /// Returns `Ok(false)` once input is exhausted.
    fn serve_card(&mut self) -> Result<bool, AtmError> {
        let Some(number) = self.prompt(CARD_NUMBER_PROMPT)? else {
            return Ok(false);
        };
        let Some(pin) = self.prompt(CARD_PIN_PROMPT)? else {
            return Ok(false);
        };

        let id = match parse_integer::<i32>(&pin)
            .and_then(|pin| self.registry.authenticate_or_create(&number, pin))
        {
            Ok(id) => id,
            Err(e) => {
                self.report(&e)?;
                return Ok(true);
            }
        };

        self.work_with_card(id)
    }

    fn work_with_card(&mut self, id: CardId) -> Result<bool, AtmError> {
        let number = self.registry.card(id).map(|card| card.number());
        writeln!(self.output, "{}", SEPARATOR)?;
        writeln!(self.output, "Your card: {}", number.unwrap_or_default())?;

        let Some(command) = self.prompt(OPERATION_PROMPT)? else {
            return Ok(false);
        };

        let operation = Operation::from_command(&command);
        debug!(card = %id, ?operation, "selected operation");

        let result = match operation {
            Operation::Balance => {
                let balance = self.registry.card(id).map_or(0, |card| card.balance());
                writeln!(self.output, "Current sum: {}$", balance)?;
                Ok(())
            }
            Operation::Deposit => match self.prompt(DEPOSIT_PROMPT)? {
                Some(amount) => {
                    parse_integer(&amount).and_then(|amount| self.registry.deposit(id, amount))
                }
                None => return Ok(false),
            },
            Operation::Withdraw => match self.prompt(WITHDRAW_PROMPT)? {
                Some(amount) => {
                    parse_integer(&amount).and_then(|amount| self.registry.withdraw(id, amount))
                }
                None => return Ok(false),
            },
            Operation::Leave => Ok(()),
        };

        if let Err(e) = result {
            self.report(&e)?;
        }

        writeln!(self.output, "{}", SEPARATOR)?;
        Ok(true)
    }

    /// Print a prompt and read one line, without its terminator
    ///
    /// Returns `Ok(None)` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AtmError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    fn report(&mut self, error: &AtmError) -> Result<(), AtmError> {
        debug!(%error, "operation rejected");
        writeln!(self.output, "{}", error)?;
        Ok(())
    }
}

/// Parse user input as an integer, ignoring surrounding whitespace
pub fn parse_integer<T: FromStr>(input: &str) -> Result<T, AtmError> {
    input
        .trim()
        .parse::<T>()
        .map_err(|_| AtmError::not_a_number(input))
}
