//! `store_name`: the first non-trivial line, unconditionally.

use crate::classify;
use crate::patterns;

const SCAN_WINDOW: usize = 8;

/// The first line (within the first 8) that is at least 3 characters, not
/// all digits, not a separator, not price-shaped. No keyword filtering: the
/// store name is reliably the first substantial line on Philippine receipts.
pub fn extract_store_name(lines: &[String]) -> Option<String> {
    for line in lines.iter().take(SCAN_WINDOW) {
        let t = line.trim();
        if t.len() < 3 {
            continue;
        }
        if patterns::ALL_DIGITS.is_match(t) {
            continue;
        }
        if patterns::SEPARATOR.is_match(t) {
            continue;
        }
        if classify::price_of(t).is_some() {
            continue;
        }
        return Some(t.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_store_name_basic() {
        let lines = vec!["MERCURY DRUG".to_string(), "PA#12345".to_string()];
        assert_eq!(extract_store_name(&lines), Some("MERCURY DRUG".to_string()));
    }

    #[test]
    fn test_extract_store_name_skips_separator_and_digits() {
        let lines = vec![
            "----------".to_string(),
            "123456".to_string(),
            "JOLLIBEE".to_string(),
        ];
        assert_eq!(extract_store_name(&lines), Some("JOLLIBEE".to_string()));
    }

    #[test]
    fn test_extract_store_name_none_when_all_trivial() {
        let lines = vec!["--".to_string(), "12".to_string()];
        assert_eq!(extract_store_name(&lines), None);
    }
}
