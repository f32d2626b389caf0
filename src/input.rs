//! Input utility functions

use crate::arch::h8::Address;
use crate::ast;
use crate::database::Database;
use std::str::FromStr;

/// Parse a number the way symbol files write them.
///
/// `0x` and `$` prefixes and the Renesas `H'` prefix denote hexadecimal;
/// anything else is decimal.
pub fn parse_int(text: &str) -> Option<u32> {
    let text = text.trim();

    for prefix in &["0x", "0X", "$", "H'", "h'"] {
        if let Some(hex) = text.strip_prefix(prefix) {
            return u32::from_str_radix(hex, 16).ok();
        }
    }

    text.parse().ok()
}

/// Parse any address specification entered in by a user.
///
/// The user may type a hexadecimal address, with or without a `0x` or `$`
/// prefix, or the name of a label known to the analysis database.
pub fn parse_address(text: &str, db: Option<&Database>) -> Option<Address> {
    if let (Ok(label), Some(db)) = (ast::Label::from_str(text), db) {
        if let Some(address) = db.label_symbol(&label) {
            return Some(address);
        }
    }

    let hex = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
        .unwrap_or(text);

    Address::from_str_radix(hex, 16).ok()
}

/// Parse a string of hexadecimal bytes, such as `6A 28 00 12 34 56` or
/// `6a2800123456`.
pub fn parse_hex_bytes(text: &str) -> Option<Vec<u8>> {
    let digits: Vec<char> = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    if digits.len() % 2 != 0 {
        return None;
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = pair[0].to_digit(16)?;
            let lo = pair[1].to_digit(16)?;

            Some((hi << 4 | lo) as u8)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_address, parse_hex_bytes, parse_int};
    use crate::ast::Label;
    use crate::database::Database;
    use crate::memory::Memory;

    #[test]
    fn input_ints() {
        assert_eq!(parse_int("4096"), Some(4096));
        assert_eq!(parse_int(" 0xFFFF78 "), Some(0xFFFF78));
        assert_eq!(parse_int("$1C"), Some(0x1C));
        assert_eq!(parse_int("H'FF10"), Some(0xFF10));
        assert_eq!(parse_int("0xZZ"), None);
        assert_eq!(parse_int("RAM"), None);
    }

    #[test]
    fn input_addresses() {
        let mut db = Database::new(Memory::new());

        db.insert_symbol(Label::new("main"), 0x1234);

        assert_eq!(parse_address("main", Some(&db)), Some(0x1234));
        assert_eq!(parse_address("main", None), None);
        assert_eq!(parse_address("1000", None), Some(0x1000));
        assert_eq!(parse_address("0x1000", None), Some(0x1000));
        assert_eq!(parse_address("$FF", Some(&db)), Some(0xFF));
        assert_eq!(parse_address("beef", Some(&db)), Some(0xBEEF));
    }

    #[test]
    fn input_hex_bytes() {
        assert_eq!(
            parse_hex_bytes("6A 28 00 12 34 56"),
            Some(vec![0x6A, 0x28, 0x00, 0x12, 0x34, 0x56])
        );
        assert_eq!(parse_hex_bytes("5470"), Some(vec![0x54, 0x70]));
        assert_eq!(parse_hex_bytes("54,70"), Some(vec![0x54, 0x70]));
        assert_eq!(parse_hex_bytes("547"), None);
        assert_eq!(parse_hex_bytes("5G"), None);
        assert_eq!(parse_hex_bytes(""), Some(vec![]));
    }
}
