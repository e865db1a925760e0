//! Per-line classification (L2): a single tagging pass over OCR lines so
//! later passes read tags instead of re-running regexes (spec §9).

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::patterns;

/// What a line looks like, independent of which extractor eventually claims
/// it. Computed once per line and consulted by every pass.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Name(String),
    Price(Decimal),
    TaxedPrice(Decimal),
    Barcode(String),
    QtyAtPrice(u32, Decimal),
    Separator,
    PaMode,
    FinancialKw,
    Junk,
    Other,
}

/// Repair the narrow set of OCR confusions that occur inside price-shaped
/// strings, never applied to product text: `O→0`, `I→1`, `L→1`, and a
/// trailing misread `1` for `T` on thermal prints.
fn repair_price_string(s: &str) -> String {
    let mut repaired: String = s
        .chars()
        .map(|c| match c {
            'O' | 'o' => '0',
            'I' | 'i' | 'L' | 'l' => '1',
            other => other,
        })
        .collect();
    if let Some(stripped) = repaired.strip_suffix('1') {
        let candidate = format!("{stripped}T");
        if patterns::PRICE_ONLY.is_match(&candidate) {
            repaired = candidate;
        }
    }
    repaired
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

/// Value of a standalone price line. Rejects `QTY_AT_PRICE` matches first.
pub fn price_of(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if patterns::QTY_LINE.is_match(trimmed) {
        return None;
    }
    let repaired = repair_price_string(trimmed);
    let caps = patterns::PRICE_ONLY.captures(&repaired)?;
    let _ = caps;
    let digits_start = repaired.find(|c: char| c.is_ascii_digit())?;
    let mut end = digits_start;
    for (i, c) in repaired[digits_start..].char_indices() {
        if c.is_ascii_digit() || c == ',' || c == '.' {
            end = digits_start + i + c.len_utf8();
        } else {
            break;
        }
    }
    parse_amount(&repaired[digits_start..end])
}

pub fn is_barcode(s: &str) -> bool {
    patterns::BARCODE.is_match(s.trim())
}

pub fn is_taxed_price(s: &str) -> bool {
    patterns::TAXED_PRICE.is_match(s.trim())
}

pub fn taxed_price_value(s: &str) -> Option<Decimal> {
    let repaired = repair_price_string(s.trim());
    let caps = patterns::TAXED_PRICE.captures(&repaired)?;
    parse_amount(&caps[1])
}

pub fn is_qty_line(s: &str) -> bool {
    patterns::QTY_LINE.is_match(s.trim())
}

/// `(qty, unit_price)` from a `"N @ P"` style line.
pub fn parse_qty_line(s: &str) -> Option<(u32, Decimal)> {
    let caps = patterns::QTY_LINE.captures(s.trim())?;
    let qty: u32 = caps[1].parse().ok()?;
    let price = parse_amount(&caps[2])?;
    Some((qty, price))
}

fn is_separator(s: &str) -> bool {
    patterns::SEPARATOR.is_match(s.trim())
}

fn is_pa_mode(s: &str) -> bool {
    patterns::PA_MODE_MARKER.is_match(s.trim())
}

fn is_financial_line(s: &str) -> bool {
    patterns::FINANCIAL_LINE.is_match(s.trim())
}

/// Discount markers, POS-terminal identifiers, accreditation footers, and
/// masked-name lines: never an item name, regardless of layout.
fn is_known_junk(s: &str) -> bool {
    let t = s.trim();
    if t.is_empty() {
        return false;
    }
    let upper = t.to_uppercase();
    if upper == "*BP" || upper == "(T)" {
        return true;
    }
    if upper.contains("LESS") && upper.contains("DISC") {
        return true;
    }
    if upper.starts_with("POS") && upper.contains('#') {
        return true;
    }
    if upper.contains("PHILLOGIX") || upper.contains("PTU") || upper.contains("ACCRED") {
        return true;
    }
    // Masked-name lines: runs of asterisks standing in for a redacted name.
    if t.chars().filter(|c| *c == '*').count() >= 3 {
        return true;
    }
    false
}

/// Measurement units or alphanumeric product codes that rescue a
/// pharmacy line which otherwise looks financial.
fn has_product_signal(upper: &str) -> bool {
    const UNITS: &[&str] = &[
        "ML", "MG", "KG", "MCG", "PCS", "TAB", "TABS", "CAP", "CAPS", "G", "L",
    ];
    if UNITS.iter().any(|u| {
        upper
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|tok| tok == *u)
    }) {
        return true;
    }
    // Alphanumeric product code: a token mixing letters and digits, length >= 4.
    upper.split_whitespace().any(|tok| {
        tok.len() >= 4
            && tok.chars().any(|c| c.is_ascii_alphabetic())
            && tok.chars().any(|c| c.is_ascii_digit())
    })
}

/// The central name predicate (spec §4.L2). `line_index`/`total_lines` feed
/// the pharmacy-only position heuristic for the product-rescue clause.
pub fn is_name(s: &str, line_index: usize, total_lines: usize, pharmacy_layout: bool) -> bool {
    let t = s.trim();
    if t.len() < 3 {
        return false;
    }
    if price_of(t).is_some() {
        return false;
    }
    if is_barcode(t) {
        return false;
    }
    if is_qty_line(t) {
        return false;
    }
    if is_pa_mode(t) {
        return false;
    }
    if is_separator(t) {
        return false;
    }
    if patterns::ALL_DIGITS.is_match(t) {
        return false;
    }

    let normalized = patterns::normalize_for_keyword_match(t);
    let looks_financial = is_financial_line(t) || patterns::FINANCIAL_KEYWORD_ANY.is_match(&normalized);

    if looks_financial {
        if pharmacy_layout {
            let in_bottom_quarter = total_lines > 0 && line_index * 4 >= total_lines * 3;
            if has_product_signal(&normalized) && !in_bottom_quarter {
                return !is_known_junk(t);
            }
        }
        return false;
    }
    if is_known_junk(t) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_of_basic() {
        assert_eq!(price_of("1,220.00"), Some(Decimal::from_str("1220.00").unwrap()));
    }

    #[test]
    fn test_price_of_rejects_qty_line() {
        assert_eq!(price_of("4 @ 299.00"), None);
    }

    #[test]
    fn test_price_of_repairs_ocr_confusion() {
        // "O" misread for "0" inside a price-shaped string.
        assert_eq!(price_of("12O.00"), Some(Decimal::from_str("120.00").unwrap()));
    }

    #[test]
    fn test_parse_qty_line() {
        assert_eq!(
            parse_qty_line("4 @ 299.00"),
            Some((4, Decimal::from_str("299.00").unwrap()))
        );
    }

    #[test]
    fn test_is_name_rejects_financial_line() {
        assert!(!is_name("GRAND TOTAL", 10, 20, false));
    }

    #[test]
    fn test_is_name_pharmacy_rescue() {
        // "TOTAL GEL 50ML" would match FINANCIAL_LINE on the word TOTAL
        // alone, but the unit ML rescues it outside the summary zone.
        assert!(is_name("TOTAL GEL 50ML", 2, 40, true));
    }

    #[test]
    fn test_is_name_pharmacy_rescue_suppressed_near_bottom() {
        assert!(!is_name("TOTAL GEL 50ML", 38, 40, true));
    }

    #[test]
    fn test_is_name_accepts_plain_product() {
        assert!(is_name("CENTRUM ADV T-30", 5, 40, true));
    }

    #[test]
    fn test_is_known_junk_masked_name() {
        assert!(is_known_junk("*** ***"));
    }

    #[test]
    fn test_is_pa_mode_without_hash() {
        assert!(is_pa_mode("PA99S/S"));
    }

    #[test]
    fn test_is_name_rejects_pa_marker_without_hash() {
        assert!(!is_name("PA99S/S", 4, 40, true));
    }

    #[test]
    fn test_price_of_repairs_thermal_trailing_one() {
        assert_eq!(price_of("1196.001"), Some(Decimal::from_str("1196.00").unwrap()));
    }

    #[test]
    fn test_taxed_price_value_repairs_thermal_trailing_one() {
        // A second OCR pass misreads the T suffix back into a trailing 1.
        assert_eq!(
            taxed_price_value("1220.001"),
            Some(Decimal::from_str("1220.00").unwrap())
        );
    }
}
