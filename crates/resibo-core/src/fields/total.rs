//! `total_amount`: inline pass first (most to least specific), then a
//! split-line fallback. `SUBTOTAL` is never used (spec §4.L3).

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::classify;
use crate::patterns;

fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

const INLINE_PATTERNS_IN_ORDER: &[fn(&str) -> Option<Decimal>] = &[
    |l| patterns::TOTAL_GRAND_TOTAL.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_AMOUNT_DUE_FULL.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_AMOUNT_DUE.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_PAYMENT.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_SALES.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_NET_AMOUNT.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_NET_SALES.captures(l).and_then(|c| parse_amount(&c[1])),
    |l| patterns::TOTAL_PLAIN.captures(l).and_then(|c| parse_amount(&c[1])),
];

/// Returns the raw decimal; callers format it as `"₱{n:,.2f}"`.
pub fn extract_total_amount(lines: &[String]) -> Option<Decimal> {
    for line in lines {
        for pattern_fn in INLINE_PATTERNS_IN_ORDER {
            if let Some(value) = pattern_fn(line) {
                return Some(value);
            }
        }
    }

    for (i, line) in lines.iter().enumerate() {
        if patterns::TOTAL_KW_PRIORITY.is_match(line.trim()) {
            if let Some(next) = lines.get(i + 1) {
                if let Some(value) = classify::price_of(next) {
                    return Some(value);
                }
            }
        }
    }

    None
}

/// Format a decimal amount as `"₱{n:,.2f}"`: two decimal places, comma
/// thousands separators on the integer part.
pub fn format_currency(value: Decimal, currency_symbol: &str) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (plain, "00".to_string()),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        currency_symbol,
        grouped,
        frac_part
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_total_inline_grand_total_wins() {
        let lines = vec![
            "TOTAL: ₱100.00".to_string(),
            "GRAND TOTAL: ₱120.00".to_string(),
        ];
        assert_eq!(
            extract_total_amount(&lines),
            Some(Decimal::from_str("120.00").unwrap())
        );
    }

    #[test]
    fn test_extract_total_split_line() {
        let lines = vec!["TOTAL".to_string(), "450.00".to_string()];
        assert_eq!(
            extract_total_amount(&lines),
            Some(Decimal::from_str("450.00").unwrap())
        );
    }

    #[test]
    fn test_extract_total_ignores_subtotal() {
        let lines = vec!["SUBTOTAL".to_string(), "450.00".to_string()];
        assert_eq!(extract_total_amount(&lines), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(
            format_currency(Decimal::from_str("1234.5").unwrap(), "₱"),
            "₱1,234.50"
        );
    }
}
