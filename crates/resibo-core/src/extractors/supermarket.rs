//! `supermarket`: zone starts at a lone `PHP` header line (spec §4.M2.b).

use std::collections::HashSet;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::classify;
use crate::models::Item;
use crate::patterns;

use super::base;
use super::ItemExtractor;

pub struct SupermarketExtractor;

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

impl SupermarketExtractor {
    /// Pass A: inline `NAME  PRICE`, optionally with an inline `N @ P` qty
    /// between name and price.
    fn pass_a(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
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

    /// Pass A2: name -> qty_line -> total_price (bottled-water style).
    fn pass_a2(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>) {
        let n = lines.len();
        for i in 0..n {
            if i + 2 >= n || used[i] || used[i + 1] || used[i + 2] {
                continue;
            }
            if !classify::is_name(&lines[i], i, n, false) {
                continue;
            }
            let Some((qty, unit_price)) = classify::parse_qty_line(&lines[i + 1]) else { continue };
            let Some(price) = classify::price_of(&lines[i + 2]) else { continue };
            items.push(Item::new(lines[i].trim(), price, i).with_qty(qty).with_unit_price(unit_price));
            used[i] = true;
            used[i + 1] = true;
            used[i + 2] = true;
        }
    }

    /// Pass B: name -> price -> optional trailing `2X50.00` qty line (the
    /// quantity follows the price here, unlike pharmacy layouts).
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
            let mut item = Item::new(lines[i].trim(), price, i);
            let mut end = i + 1;
            if let Some(trailing) = lines.get(i + 2) {
                if !used[i + 2] {
                    if let Some((qty, unit_price)) = classify::parse_qty_line(trailing) {
                        item = item.with_qty(qty).with_unit_price(unit_price);
                        end = i + 2;
                    }
                }
            }
            items.push(item);
            for k in i..=end {
                used[k] = true;
            }
        }
    }

    /// Pass C: name -> barcode -> price.
    fn pass_c(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        let n = lines.len();
        for i in 0..n {
            if i + 2 >= n || used[i] || used[i + 1] || used[i + 2] {
                continue;
            }
            if !classify::is_name(&lines[i], i, n, false) {
                continue;
            }
            if !classify::is_barcode(&lines[i + 1]) {
                continue;
            }
            let Some(price) = classify::price_of(&lines[i + 2]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }
            items.push(Item::new(lines[i].trim(), price, i).with_sku(lines[i + 1].trim()));
            used[i] = true;
            used[i + 1] = true;
            used[i + 2] = true;
        }
    }
}

impl ItemExtractor for SupermarketExtractor {
    fn extract(&self, lines: &[String]) -> Vec<Item> {
        let zone = base::compute_zone(lines, Some("PHP"));
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
        self.pass_a2(lines, &mut used, &mut items);
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
    fn test_pass_a_inline() {
        let lines: Vec<String> = vec![
            "SM SUPERMARKET".to_string(),
            "PHP".to_string(),
            "NIDO 3+ 1.2KG   245.00".to_string(),
            "** 1 item(s) **".to_string(),
        ];
        let items = SupermarketExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "NIDO 3+ 1.2KG");
        assert_eq!(items[0].price, Decimal::from_str("245.00").unwrap());
    }

    #[test]
    fn test_pass_b_trailing_qty() {
        let lines: Vec<String> = vec![
            "PUREGOLD".to_string(),
            "PHP".to_string(),
            "SARDINES 155G".to_string(),
            "25.00".to_string(),
            "2X25.00".to_string(),
        ];
        let items = SupermarketExtractor.extract(&lines);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 2);
    }
}
