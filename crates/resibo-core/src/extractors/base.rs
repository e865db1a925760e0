//! Shared skeleton used by every [`super::ItemExtractor`] (spec §4.M2).

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::classify;
use crate::patterns;

/// `[zone_start, zone_end)` over the line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub start: usize,
    pub end: usize,
}

fn find_zone_end(lines: &[String]) -> usize {
    lines
        .iter()
        .position(|l| patterns::ZONE_END.is_match(l.trim()))
        .unwrap_or(lines.len())
}

/// Plain zone: starts at 0 unless a start marker is given, ends at the first
/// zone-end keyword.
pub fn compute_zone(lines: &[String], start_marker: Option<&str>) -> Zone {
    let end = find_zone_end(lines);
    let start = match start_marker {
        Some(marker) => lines
            .iter()
            .position(|l| l.to_uppercase().contains(marker))
            .map(|i| i + 1)
            .unwrap_or(0),
        None => 0,
    };
    Zone { start: start.min(end), end }
}

/// Pharmacy zone: starts after `PA#…`, then extends backward up to 6 lines
/// past preserved (non-header, non-separator, non-junk) content, because
/// item names sometimes precede the marker.
pub fn compute_pharmacy_zone(lines: &[String]) -> Zone {
    let end = find_zone_end(lines);
    let pa_index = lines.iter().position(|l| patterns::PA_MODE_MARKER.is_match(l.trim()));

    let Some(pa_index) = pa_index else {
        return Zone { start: 0, end };
    };

    let mut start = pa_index + 1;
    let mut extended = 0;
    let mut i = pa_index;
    while i > 0 && extended < 6 {
        i -= 1;
        let line = lines[i].trim();
        if line.is_empty() || patterns::SEPARATOR.is_match(line) {
            break;
        }
        if classify::is_name(line, i, lines.len(), true) || !looks_financial_or_junk(line) {
            start = i;
            extended += 1;
        } else {
            break;
        }
    }
    Zone { start: start.min(end), end }
}

fn looks_financial_or_junk(line: &str) -> bool {
    patterns::FINANCIAL_LINE.is_match(line) || patterns::ZONE_END.is_match(line)
}

/// Definitive-financial-keyword-adjacent amounts, minus any value that also
/// occurs as a taxed price anywhere on the receipt (the single-item receipt
/// exception: without it, `TOTAL == item price` would delete the only item).
pub fn compute_skip_prices(lines: &[String]) -> HashSet<Decimal> {
    let mut skip = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        let t = line.trim();
        if !patterns::DEFINITIVE_FINANCIAL.is_match(t) {
            continue;
        }
        if let Some(v) = classify::price_of(t) {
            skip.insert(v);
            continue;
        }
        if let Some(next) = lines.get(i + 1) {
            if let Some(v) = classify::price_of(next) {
                skip.insert(v);
            }
        }
    }

    let taxed: HashSet<Decimal> = lines.iter().filter_map(|l| classify::taxed_price_value(l)).collect();
    skip.retain(|v| !taxed.contains(v));
    skip
}

/// Truncate to the receipt's own stated item count, in source order, when a
/// cap is known and extraction over-shot it.
pub fn apply_stated_count_cap(mut items: Vec<crate::models::Item>, stated_count: Option<u32>) -> Vec<crate::models::Item> {
    if let Some(cap) = stated_count {
        let cap = cap as usize;
        if items.len() > cap {
            items.sort_by_key(|it| it.source_index);
            items.truncate(cap);
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_zone_end_at_subtotal() {
        let lines = vec!["A".to_string(), "SUBTOTAL".to_string(), "B".to_string()];
        let zone = compute_zone(&lines, None);
        assert_eq!(zone, Zone { start: 0, end: 1 });
    }

    #[test]
    fn test_compute_skip_prices_excludes_taxed_duplicate() {
        let lines = vec![
            "GRAND TOTAL".to_string(),
            "100.00".to_string(),
            "100.00T".to_string(),
        ];
        let skip = compute_skip_prices(&lines);
        assert!(skip.is_empty());
    }

    #[test]
    fn test_compute_skip_prices_keeps_untaxed_duplicate() {
        let lines = vec!["GRAND TOTAL".to_string(), "100.00".to_string()];
        let skip = compute_skip_prices(&lines);
        assert_eq!(skip.len(), 1);
    }
}
