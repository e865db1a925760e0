//! `department_store` (spec §4.M2.d).

use std::collections::HashSet;

use rust_decimal::Decimal;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::classify;
use crate::models::Item;
use crate::patterns;

use super::base;
use super::ItemExtractor;

lazy_static! {
    /// `"ITEM NAME  QTY  PRICE"`: qty precedes price, unlike the supermarket
    /// trailing-qty convention.
    static ref QTY_PRICE_INLINE: Regex =
        Regex::new(r"^(.+?)\s{2,}(\d{1,4})\s{1,}[₱P]?\s*(\d[\d,]*\.\d{2})\s*$").unwrap();
}

pub struct DepartmentStoreExtractor;

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

impl DepartmentStoreExtractor {
    /// Pass A: qty-before-price inline.
    fn pass_a(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        for (i, line) in lines.iter().enumerate() {
            if used[i] {
                continue;
            }
            let Some(caps) = QTY_PRICE_INLINE.captures(line.trim()) else { continue };
            let name = caps[1].trim();
            if name.len() < 3 {
                continue;
            }
            let qty: u32 = caps[2].parse().unwrap_or(1);
            let Some(price) = parse_decimal(&caps[3]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }
            items.push(Item::new(name, price, i).with_qty(qty));
            used[i] = true;
        }
    }

    /// Pass B: plain `"ITEM NAME  PRICE"` inline.
    fn pass_b(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
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
            items.push(Item::new(name, price, i));
            used[i] = true;
        }
    }

    /// Pass C: 2-line name -> price.
    fn pass_c(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
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

impl ItemExtractor for DepartmentStoreExtractor {
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
        self.pass_a(lines, &mut used, &mut items, &skip_prices);
        self.pass_b(lines, &mut used, &mut items, &skip_prices);
        self.pass_c(lines, &mut used, &mut items, &skip_prices);

        items.sort_by_key(|it| it.source_index);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_a_qty_before_price() {
        let lines: Vec<String> = vec![
            "NATIONAL BOOKSTORE".to_string(),
            "ITEM CODE: 4001".to_string(),
            "BALLPEN BLACK  3  15.00".to_string(),
        ];
        let items = DepartmentStoreExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 3);
        assert_eq!(items[0].price, Decimal::from_str("15.00").unwrap());
    }

    #[test]
    fn test_pass_c_two_line() {
        let lines: Vec<String> = vec![
            "RUSTAN'S".to_string(),
            "NOTEBOOK A5".to_string(),
            "85.00".to_string(),
        ];
        let items = DepartmentStoreExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "NOTEBOOK A5");
    }
}
