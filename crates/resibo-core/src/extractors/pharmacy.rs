//! `pharmacy_column`: Mercury Drug and similar chains read the price column
//! before the item column, so several sub-layouts coexist on one receipt.
//! Passes are ordered by specificity, most constrained first (spec §4.M2.a).

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::classify;
use crate::models::Item;
use crate::patterns;

use super::base;
use super::ItemExtractor;

pub struct PharmacyColumnExtractor;

const MAX_JUNK_SKIP: usize = 3;
const MAX_BARCODE_LOOKAHEAD: usize = 5;

fn is_junk_between(line: &str) -> bool {
    let t = line.trim();
    let upper = t.to_uppercase();
    upper == "*BP" || upper == "(T)" || patterns::SEPARATOR.is_match(t) || t.len() <= 2
}

fn is_short_token(line: &str) -> bool {
    let t = line.trim();
    (3..=5).contains(&t.len()) && t.bytes().all(|b| b.is_ascii_digit())
}

impl PharmacyColumnExtractor {
    /// Pass B2: Name -> Barcode -> QtyLine -> Price, all strictly adjacent.
    fn pass_b2(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>) {
        let n = lines.len();
        for i in 0..n {
            if i + 3 >= n || used[i] || used[i + 1] || used[i + 2] || used[i + 3] {
                continue;
            }
            if !classify::is_name(&lines[i], i, n, true) {
                continue;
            }
            if !classify::is_barcode(&lines[i + 1]) {
                continue;
            }
            let Some((qty, unit_price)) = classify::parse_qty_line(&lines[i + 2]) else {
                continue;
            };
            let Some(price) = classify::price_of(&lines[i + 3]).or_else(|| classify::taxed_price_value(&lines[i + 3])) else {
                continue;
            };

            let item = Item::new(lines[i].trim(), price, i)
                .with_qty(qty)
                .with_unit_price(unit_price)
                .with_sku(lines[i + 1].trim());
            items.push(item);
            for j in i..=i + 3 {
                used[j] = true;
            }
        }
    }

    /// Pass A1b: Name -> [up to 3 junk lines] -> TaxedPrice, requiring one of
    /// {taxed suffix, trailing barcode, junk skipped}; opportunistically
    /// consumes a trailing barcode and qty line.
    fn pass_a1b(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>) {
        let n = lines.len();
        for i in 0..n {
            if used[i] || !classify::is_name(&lines[i], i, n, true) {
                continue;
            }
            let mut j = i + 1;
            let mut junk_skipped = 0;
            while j < n && !used[j] && is_junk_between(&lines[j]) && junk_skipped < MAX_JUNK_SKIP {
                j += 1;
                junk_skipped += 1;
            }
            if j >= n || used[j] {
                continue;
            }
            let taxed = classify::is_taxed_price(&lines[j]);
            let Some(price) = classify::taxed_price_value(&lines[j]).or_else(|| classify::price_of(&lines[j])) else {
                continue;
            };

            let mut consumed_to = j;
            let mut sku = None;
            if let Some(next) = lines.get(j + 1) {
                if !used[j + 1] && classify::is_barcode(next) {
                    sku = Some(next.trim().to_string());
                    consumed_to = j + 1;
                }
            }
            if !(taxed || junk_skipped > 0 || sku.is_some()) {
                continue;
            }

            let mut qty_and_unit = None;
            if let Some(next) = lines.get(consumed_to + 1) {
                if !used[consumed_to + 1] {
                    if let Some(qu) = classify::parse_qty_line(next) {
                        qty_and_unit = Some(qu);
                        consumed_to += 1;
                    }
                }
            }

            let mut item = Item::new(lines[i].trim(), price, i);
            if let Some(code) = sku {
                item = item.with_sku(code);
            }
            if let Some((qty, unit_price)) = qty_and_unit {
                item = item.with_qty(qty).with_unit_price(unit_price);
            }
            items.push(item);
            for k in i..=consumed_to {
                used[k] = true;
            }
        }
    }

    /// Pass A1a: TaxedPrice -> Name -> Barcode. Backward guard: if a B2
    /// pattern precedes this price, B2 already owns it.
    fn pass_a1a(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>) {
        let n = lines.len();
        for j in 0..n {
            if used[j] || !classify::is_taxed_price(&lines[j]) {
                continue;
            }
            // Backward guard against B2.
            let mut guarded = false;
            for back in 1..=3 {
                if j < back {
                    break;
                }
                let b_idx = j - back;
                if b_idx > 0 && classify::is_barcode(&lines[b_idx]) && classify::is_name(&lines[b_idx - 1], b_idx - 1, n, true) {
                    guarded = true;
                    break;
                }
            }
            if guarded {
                continue;
            }
            let name_idx = j + 1;
            if name_idx >= n || used[name_idx] || !classify::is_name(&lines[name_idx], name_idx, n, true) {
                continue;
            }
            let Some(price) = classify::taxed_price_value(&lines[j]) else { continue };

            let mut end = name_idx;
            let mut sku = None;
            if let Some(next) = lines.get(name_idx + 1) {
                if !used[name_idx + 1] && classify::is_barcode(next) {
                    sku = Some(next.trim().to_string());
                    end = name_idx + 1;
                }
            }

            let mut item = Item::new(lines[name_idx].trim(), price, name_idx);
            if let Some(code) = sku {
                item = item.with_sku(code);
            }
            items.push(item);
            for k in j..=end {
                used[k] = true;
            }
        }
    }

    /// Pass A2: UntaxedPrice -> Name -> Barcode. Forward guard: a later
    /// unused price after the name is probably the real item price (more
    /// likely than the price preceding it in OCR reading order).
    fn pass_a2(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        let n = lines.len();
        for j in 0..n {
            if used[j] {
                continue;
            }
            let Some(price) = classify::price_of(&lines[j]) else { continue };
            if skip_prices.contains(&price) {
                continue;
            }
            let name_idx = j + 1;
            if name_idx >= n || used[name_idx] || !classify::is_name(&lines[name_idx], name_idx, n, true) {
                continue;
            }

            let mut end = name_idx;
            let mut sku = None;
            if let Some(next) = lines.get(name_idx + 1) {
                if !used[name_idx + 1] && classify::is_barcode(next) {
                    sku = Some(next.trim().to_string());
                    end = name_idx + 1;
                }
            }

            // Forward guard: an unused price right after the name (or
            // barcode) is more likely the real item price than `price`.
            let after = end + 1;
            if let Some(later) = lines.get(after) {
                if !used[after] && classify::price_of(later).is_some() {
                    continue;
                }
            }

            let mut item = Item::new(lines[name_idx].trim(), price, name_idx);
            if let Some(code) = sku {
                item = item.with_sku(code);
            }
            items.push(item);
            for k in j..=end {
                used[k] = true;
            }
        }
    }

    /// Pass B: Name -> [junk...] -> Barcode -> Price, scanning up to 5 lines.
    fn pass_b(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>) {
        let n = lines.len();
        for i in 0..n {
            if used[i] || !classify::is_name(&lines[i], i, n, true) {
                continue;
            }
            let mut barcode_idx = None;
            for j in (i + 1)..n.min(i + 1 + MAX_BARCODE_LOOKAHEAD) {
                if used[j] {
                    break;
                }
                let t = lines[j].trim();
                if classify::is_barcode(t) {
                    barcode_idx = Some(j);
                    break;
                }
                if is_junk_between(t) || classify::is_qty_line(t) || is_short_token(t) {
                    continue;
                }
                break;
            }
            let Some(barcode_idx) = barcode_idx else { continue };

            let mut qty_and_unit = None;
            let mut cursor = barcode_idx + 1;
            if let Some(next) = lines.get(cursor) {
                if !used[cursor] {
                    if let Some(qu) = classify::parse_qty_line(next) {
                        qty_and_unit = Some(qu);
                        cursor += 1;
                    }
                }
            }

            let next_is_unused_price = lines
                .get(cursor)
                .map(|l| !used[cursor] && (classify::price_of(l).is_some() || classify::is_taxed_price(l)))
                .unwrap_or(false);

            let price = if next_is_unused_price {
                let next = &lines[cursor];
                let is_total_next = lines
                    .get(cursor + 1)
                    .map(|l| patterns::TOTAL_KW_PRIORITY.is_match(l.trim()))
                    .unwrap_or(false);
                if is_total_next {
                    qty_and_unit.map(|(q, u)| u * Decimal::from(q))
                } else {
                    classify::price_of(next).or_else(|| classify::taxed_price_value(next))
                }
            } else {
                None
            };
            let Some(price) = price.or_else(|| recover_from_less_bp_disc(lines, barcode_idx)) else {
                continue;
            };

            let consumed_price_idx = if next_is_unused_price { Some(cursor) } else { None };

            let mut item = Item::new(lines[i].trim(), price, i).with_sku(lines[barcode_idx].trim());
            if let Some((qty, unit_price)) = qty_and_unit {
                item = item.with_qty(qty).with_unit_price(unit_price);
            }
            items.push(item);
            used[i] = true;
            for k in (i + 1)..=barcode_idx {
                used[k] = true;
            }
            if let Some(idx) = consumed_price_idx {
                for k in (barcode_idx + 1)..=idx {
                    used[k] = true;
                }
            }
        }
    }

    /// Pass C: last-resort Name -> Price pair.
    fn pass_c(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        let n = lines.len();
        for i in 0..n {
            if used[i] || i + 1 >= n || used[i + 1] {
                continue;
            }
            if !classify::is_name(&lines[i], i, n, true) {
                continue;
            }
            let Some(price) = classify::price_of(&lines[i + 1]).or_else(|| classify::taxed_price_value(&lines[i + 1])) else {
                continue;
            };
            if skip_prices.contains(&price) {
                continue;
            }
            items.push(Item::new(lines[i].trim(), price, i));
            used[i] = true;
            used[i + 1] = true;
        }
    }

    /// Pass D: any remaining inline `NAME  PRICE` line.
    fn pass_d(&self, lines: &[String], used: &mut [bool], items: &mut Vec<Item>, skip_prices: &HashSet<Decimal>) {
        for (i, line) in lines.iter().enumerate() {
            if used[i] {
                continue;
            }
            let Some(caps) = patterns::PRICE_INLINE.captures(line.trim()) else { continue };
            let name = caps[1].trim();
            if name.len() < 3 {
                continue;
            }
            let Some(price) = parse_decimal(&caps[2]) else {
                continue;
            };
            if skip_prices.contains(&price) {
                continue;
            }
            items.push(Item::new(name, price, i));
            used[i] = true;
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    use std::str::FromStr;
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

fn recover_from_less_bp_disc(lines: &[String], barcode_idx: usize) -> Option<Decimal> {
    let line = lines.get(barcode_idx + 1)?;
    let upper = line.to_uppercase();
    if !(upper.contains("LESS") && upper.contains("DISC")) {
        return None;
    }
    let idx = upper.find('X')?;
    parse_decimal(line[idx + 1..].trim())
}

impl ItemExtractor for PharmacyColumnExtractor {
    fn extract(&self, lines: &[String]) -> Vec<Item> {
        let zone = base::compute_pharmacy_zone(lines);
        let skip_prices = base::compute_skip_prices(lines);
        let n = lines.len();
        let mut used = vec![false; n];
        for i in 0..n {
            if i < zone.start || i >= zone.end {
                used[i] = true;
            }
        }

        let mut items = Vec::new();
        self.pass_b2(lines, &mut used, &mut items);
        self.pass_a1b(lines, &mut used, &mut items);
        self.pass_a1a(lines, &mut used, &mut items);
        self.pass_a2(lines, &mut used, &mut items, &skip_prices);
        self.pass_b(lines, &mut used, &mut items);
        self.pass_c(lines, &mut used, &mut items, &skip_prices);
        self.pass_d(lines, &mut used, &mut items, &skip_prices);

        items = apply_orphan_inference(lines, &zone, &used, items);
        items.sort_by_key(|it| it.source_index);
        items
    }
}

/// If exactly one unclaimed `name -> barcode` pair remains and the receipt's
/// total exceeds the sum already detected, synthesize the missing item.
fn apply_orphan_inference(
    lines: &[String],
    zone: &base::Zone,
    used: &[bool],
    mut items: Vec<Item>,
) -> Vec<Item> {
    let n = lines.len();
    let mut orphans = Vec::new();
    for i in zone.start..zone.end.min(n.saturating_sub(1)) {
        if used[i] || used[i + 1] {
            continue;
        }
        if classify::is_name(&lines[i], i, n, true) && classify::is_barcode(&lines[i + 1]) {
            orphans.push((i, lines[i].trim().to_string(), lines[i + 1].trim().to_string()));
        }
    }
    if orphans.len() != 1 {
        return items;
    }

    let detected_sum: Decimal = items.iter().map(|it| it.price).sum();
    let total = lines.iter().rev().find_map(|l| {
        if patterns::TOTAL_GRAND_TOTAL.is_match(l) || patterns::TOTAL_AMOUNT_DUE.is_match(l) || patterns::TOTAL_PLAIN.is_match(l) {
            crate::fields::extract_total_amount(std::slice::from_ref(l))
        } else {
            None
        }
    });

    if let Some(total) = total {
        if total > detected_sum {
            let (idx, name, barcode) = &orphans[0];
            items.push(Item::new(name.clone(), total - detected_sum, *idx).with_sku(barcode.clone()));
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn lines(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pass_b2_multi_qty() {
        let input = lines(&[
            "MERCURY DRUG",
            "PA#12345",
            "CENTRUM ADV T-30",
            "480015330215",
            "4 @ 299.00",
            "1196.00T",
            "TOTAL",
            "1196.00",
        ]);
        let items = PharmacyColumnExtractor.extract(&input);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "CENTRUM ADV T-30");
        assert_eq!(items[0].qty, 4);
        assert_eq!(items[0].price, Decimal::from_str("1196.00").unwrap());
        assert_eq!(items[0].sku.as_deref(), Some("480015330215"));
    }

    #[test]
    fn test_pass_c_fallback() {
        let input = lines(&["MERCURY DRUG", "PA#1", "BIOGESIC 500MG", "120.00", "TOTAL", "120.00"]);
        let items = PharmacyColumnExtractor.extract(&input);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "BIOGESIC 500MG");
    }
}
