//! Text format for persisted card records
//!
//! One card per line: `<number> <pin> <balance>`, fields separated by a
//! single space. The number is written exactly as it was entered.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::Card;

/// Separator between the fields of a record
pub const FIELD_SEPARATOR: char = ' ';

/// Number of fields in a record
const FIELD_COUNT: usize = 3;

/// Parse a single record line into a Card
///
/// Returns `None` when the line does not split into exactly three fields or
/// when the PIN or balance is not an integer. Trailing empty fields (from
/// trailing spaces) are dropped before counting. The number and PIN are not
/// checked against the card format here; that is the registry's job.
///
/// # Arguments
///
/// * `line` - One line of the store, without its terminator
///
/// # Returns
///
/// * `Some(Card)` - The fields parsed
/// * `None` - The line is not a record
pub fn parse_card(line: &str) -> Option<Card> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while fields.last() == Some(&"") {
        fields.pop();
    }
    if fields.len() != FIELD_COUNT {
        return None;
    }

    let pin = fields[1].parse::<i32>().ok()?;
    let balance = fields[2].parse::<i64>().ok()?;

    Some(Card::with_balance(fields[0], pin, balance))
}

/// Serialize a Card into a record line (without a line terminator)
pub fn serialize_card(card: &Card) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        card.raw_number(),
        card.pin(),
        card.balance(),
        sep = FIELD_SEPARATOR
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("AAAA-BBBB-1111-2222 4321 500", "AAAA-BBBB-1111-2222", 4321, 500)]
    #[case::lowercase_kept("aaaa-bbbb-1111-2222 4321 0", "aaaa-bbbb-1111-2222", 4321, 0)]
    #[case::explicit_plus("AAAA-BBBB-1111-2222 +4321 +7", "AAAA-BBBB-1111-2222", 4321, 7)]
    #[case::unvalidated_number("garbage 1 -3", "garbage", 1, -3)]
    #[case::trailing_space("AAAA-BBBB-1111-2222 4321 500 ", "AAAA-BBBB-1111-2222", 4321, 500)]
    #[case::trailing_spaces("AAAA-BBBB-1111-2222 4321 500   ", "AAAA-BBBB-1111-2222", 4321, 500)]
    fn test_parse_card_valid(
        #[case] line: &str,
        #[case] number: &str,
        #[case] pin: i32,
        #[case] balance: i64,
    ) {
        let card = parse_card(line).expect("line should parse");
        assert_eq!(card.raw_number(), number);
        assert!(card.pin_matches(pin));
        assert_eq!(card.balance(), balance);
    }

    #[rstest]
    #[case::empty("")]
    #[case::two_fields("AAAA-BBBB-1111-2222 4321")]
    #[case::four_fields("AAAA-BBBB-1111-2222 4321 500 1")]
    #[case::double_space("AAAA-BBBB-1111-2222  4321 500")]
    #[case::only_spaces("   ")]
    #[case::two_fields_trailing_space("AAAA-BBBB-1111-2222 4321 ")]
    #[case::leading_space(" AAAA-BBBB-1111-2222 4321 500")]
    #[case::tab_separated("AAAA-BBBB-1111-2222\t4321\t500")]
    #[case::pin_not_number("AAAA-BBBB-1111-2222 abcd 500")]
    #[case::balance_not_number("AAAA-BBBB-1111-2222 4321 5x0")]
    #[case::balance_decimal("AAAA-BBBB-1111-2222 4321 5.0")]
    #[case::pin_overflow("AAAA-BBBB-1111-2222 99999999999 500")]
    fn test_parse_card_rejects(#[case] line: &str) {
        assert_eq!(parse_card(line), None);
    }

    #[test]
    fn test_serialize_card_keeps_raw_number() {
        let card = Card::with_balance("aaaa-bbbb-1111-2222", 4321, 500);
        assert_eq!(serialize_card(&card), "aaaa-bbbb-1111-2222 4321 500");
    }

    #[test]
    fn test_serialize_new_card() {
        let card = Card::new("AAAA-BBBB-1111-2222", 1000);
        assert_eq!(serialize_card(&card), "AAAA-BBBB-1111-2222 1000 0");
    }
}
