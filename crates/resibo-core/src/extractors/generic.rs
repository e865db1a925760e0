//! `generic`: the safe fallback when no layout signal was found. Conservative
//! and inline-only, with strict name filtering (spec §4.M2.f).

use std::collections::HashSet;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::Item;
use crate::patterns;

use super::base;
use super::ItemExtractor;

pub struct GenericExtractor;

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Stricter than the shared `is_name`: must start with a letter, be at
/// least 3 characters, and carry no financial vocabulary at all.
fn is_generic_name(name: &str) -> bool {
    let t = name.trim();
    if t.len() < 3 {
        return false;
    }
    if !t.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false) {
        return false;
    }
    if patterns::FINANCIAL_LINE.is_match(t) || patterns::FINANCIAL_KEYWORD_ANY.is_match(&t.to_uppercase()) {
        return false;
    }
    true
}

impl ItemExtractor for GenericExtractor {
    fn extract(&self, lines: &[String]) -> Vec<Item> {
        let zone = base::compute_zone(lines, None);
        let skip_prices = base::compute_skip_prices(lines);
        let mut items = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if i < zone.start || i >= zone.end {
                continue;
            }
            let Some(caps) = patterns::PRICE_INLINE.captures(line.trim()) else { continue };
            let name = caps[1].trim();
            if !is_generic_name(name) {
                continue;
            }
            let Some(price) = parse_decimal(&caps[2]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }
            items.push(Item::new(name, price, i));
        }

        items.sort_by_key(|it| it.source_index);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_inline_only() {
        let lines: Vec<String> = vec![
            "UNKNOWN STORE".to_string(),
            "BOTTLED WATER   20.00".to_string(),
            "TOTAL   20.00".to_string(),
        ];
        let items = GenericExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "BOTTLED WATER");
    }

    #[test]
    fn test_generic_rejects_financial_name() {
        assert!(!is_generic_name("TOTAL"));
        assert!(!is_generic_name("12345"));
    }
}
