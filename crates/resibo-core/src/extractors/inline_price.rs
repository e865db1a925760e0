//! `inline_price`: unrecognized store, but structural fingerprinting found an
//! inline layout. Zone bounded the same way as the other extractors; no
//! chain-specific start marker is known (spec §4.M2.e).

use std::collections::HashSet;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::classify;
use crate::models::Item;
use crate::patterns;

use super::base;
use super::ItemExtractor;

pub struct InlinePriceExtractor;

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

impl InlinePriceExtractor {
    /// Pass 1: inline `NAME  PRICE`, opportunistically consuming a trailing
    /// barcode line.
    fn pass_inline(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        for (i, line) in lines.iter().enumerate() {
            if used[i] {
                continue;
            }
            let Some(caps) = patterns::PRICE_INLINE.captures(line.trim()) else { continue };
            let name = caps[1].trim();
            if name.len() < 3 {
                continue;
            }
            let Some(price) = parse_decimal(&caps[2]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }
            let mut item = Item::new(name, price, i);
            let mut end = i;
            if let Some(next) = lines.get(i + 1) {
                if !used[i + 1] && classify::is_barcode(next) {
                    item = item.with_sku(next.trim());
                    end = i + 1;
                }
            }
            items.push(item);
            for k in i..=end {
                used[k] = true;
            }
        }
    }

    /// Pass 2: name -> price, for anything the inline pass missed.
    fn pass_name_then_price(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        let n = lines.len();
        for i in 0..n {
            if i + 1 >= n || used[i] || used[i + 1] {
                continue;
            }
            if !classify::is_name(&lines[i], i, n, false) {
                continue;
            }
            let Some(price) = classify::price_of(&lines[i + 1]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }
            items.push(Item::new(lines[i].trim(), price, i));
            used[i] = true;
            used[i + 1] = true;
        }
    }
}

impl ItemExtractor for InlinePriceExtractor {
    fn extract(&self, lines: &[String]) -> Vec<Item> {
        let zone = base::compute_zone(lines, None);
        let skip_prices = base::compute_skip_prices(lines);
        let n = lines.len();
        let mut used = vec![false; n];
        for i in 0..n {
            if i < zone.start || i >= zone.end {
                used[i] = true;
            }
        }

        let mut items = Vec::new();
        self.pass_inline(lines, &mut used, &mut items, &skip_prices);
        self.pass_name_then_price(lines, &mut used, &mut items, &skip_prices);

        items.sort_by_key(|it| it.source_index);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_pass_with_trailing_barcode() {
        let lines: Vec<String> = vec![
            "CORNER STORE".to_string(),
            "BOND PAPER A4   180.00".to_string(),
            "480012345678".to_string(),
        ];
        let items = InlinePriceExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku.as_deref(), Some("480012345678"));
    }

    #[test]
    fn test_name_then_price_fallback() {
        let lines: Vec<String> = vec!["CORNER STORE".to_string(), "CANDLE".to_string(), "25.00".to_string()];
        let items = InlinePriceExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "CANDLE");
    }
}
