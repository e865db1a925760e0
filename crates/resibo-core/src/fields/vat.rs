//! `vat_amount`: same inline-then-split logic as `total_amount`.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::classify;
use crate::patterns;

fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

pub fn extract_vat_amount(lines: &[String]) -> Option<Decimal> {
    for line in lines {
        if let Some(caps) = patterns::VAT_PCT_FIRST.captures(line) {
            if let Some(v) = parse_amount(&caps[2]) {
                return Some(v);
            }
        }
        if let Some(caps) = patterns::VAT_AMOUNT_LABEL.captures(line) {
            if let Some(v) = parse_amount(&caps[1]) {
                return Some(v);
            }
        }
        if let Some(caps) = patterns::VAT_OUTPUT_TAX.captures(line) {
            if let Some(v) = parse_amount(&caps[1]) {
                return Some(v);
            }
        }
        if let Some(caps) = patterns::VAT_INLINE.captures(line) {
            if let Some(v) = parse_amount(&caps[1]) {
                return Some(v);
            }
        }
    }

    for (i, line) in lines.iter().enumerate() {
        if patterns::VAT_KW.is_match(line.trim()) {
            if let Some(next) = lines.get(i + 1) {
                if let Some(value) = classify::price_of(next) {
                    return Some(value);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_vat_inline() {
        let lines = vec!["VAT-12%: 130.71".to_string()];
        assert_eq!(
            extract_vat_amount(&lines),
            Some(Decimal::from_str("130.71").unwrap())
        );
    }

    #[test]
    fn test_extract_vat_split_line() {
        let lines = vec!["VAT".to_string(), "130.71".to_string()];
        assert_eq!(
            extract_vat_amount(&lines),
            Some(Decimal::from_str("130.71").unwrap())
        );
    }

    #[test]
    fn test_extract_vat_output_tax() {
        let lines = vec!["OUTPUT TAX: 99.00".to_string()];
        assert_eq!(
            extract_vat_amount(&lines),
            Some(Decimal::from_str("99.00").unwrap())
        );
    }
}
