//! `fast_food`: skip the order header block, then a qty-prefix inline pass
//! falling through to a plain 2-line pass (spec §4.M2.c).

use std::collections::HashSet;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::classify;
use crate::models::Item;
use crate::patterns;

use super::base;
use super::ItemExtractor;

pub struct FastFoodExtractor;

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

fn is_header_line(line: &str) -> bool {
    let upper = line.trim().to_uppercase();
    ["ORDER#", "TABLE#", "DINE IN", "TAKE OUT", "DRIVE THRU", "CASHIER"]
        .iter()
        .any(|kw| upper.contains(kw))
}

fn qty_prefix(line: &str) -> Option<(u32, &str)> {
    let t = line.trim();
    let mut parts = t.splitn(2, char::is_whitespace);
    let first = parts.next()?;
    let rest = parts.next()?.trim();
    let qty: u32 = first.parse().ok()?;
    if qty == 0 || qty > 99 {
        return None;
    }
    Some((qty, rest))
}

impl FastFoodExtractor {
    /// Pass A: qty-prefix inline, e.g. `"2 PEACH MANGO PIE   69.00"`, falling
    /// through to a plain inline match.
    fn pass_a(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        for (i, line) in lines.iter().enumerate() {
            if used[i] {
                continue;
            }
            let Some(caps) = patterns::PRICE_INLINE.captures(line.trim()) else { continue };
            let body = caps[1].trim();
            let Some(price) = parse_decimal(&caps[2]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }

            if let Some((qty, name)) = qty_prefix(body) {
                if name.len() >= 3 {
                    items.push(Item::new(name, price, i).with_qty(qty));
                    used[i] = true;
                    continue;
                }
            }
            if body.len() >= 3 {
                items.push(Item::new(body, price, i));
                used[i] = true;
            }
        }
    }

    /// Pass B: plain 2-line name -> price.
    fn pass_b(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
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

impl ItemExtractor for FastFoodExtractor {
    fn extract(&self, lines: &[String]) -> Vec<Item> {
        let skip_prices = base::compute_skip_prices(lines);
        let n = lines.len();
        let mut used = vec![false; n];
        for (i, line) in lines.iter().enumerate() {
            if is_header_line(line) {
                used[i] = true;
            }
        }
        // Zone end still bounds the item area; the financial summary
        // should never be mistaken for items even without a start marker.
        let zone = base::compute_zone(lines, None);
        for i in 0..n {
            if i >= zone.end {
                used[i] = true;
            }
        }

        let mut items = Vec::new();
        self.pass_a(lines, &mut used, &mut items, &skip_prices);
        self.pass_b(lines, &mut used, &mut items, &skip_prices);

        items.sort_by_key(|it| it.source_index);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qty_prefix_inline() {
        let lines: Vec<String> = vec![
            "JOLLIBEE".to_string(),
            "ORDER#15".to_string(),
            "CASHIER: MIKA".to_string(),
            "2 PEACH MANGO PIE   69.00".to_string(),
            "TOTAL".to_string(),
            "69.00".to_string(),
        ];
        let items = FastFoodExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "PEACH MANGO PIE");
        assert_eq!(items[0].qty, 2);
    }

    #[test]
    fn test_two_line_fallback() {
        let lines: Vec<String> = vec![
            "MCDONALD'S".to_string(),
            "DRIVE THRU".to_string(),
            "BIG MAC MEAL".to_string(),
            "189.00".to_string(),
        ];
        let items = FastFoodExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "BIG MAC MEAL");
    }
}
