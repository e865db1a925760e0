//! M1: `ReceiptClassifier`. Three passes: chain signal, layout marker,
//! structural fingerprinting (spec §4.M1).

use crate::patterns;
use crate::receipt_type::{Confidence, ReceiptType};

struct Signature {
    receipt_type: ReceiptType,
    chain_signals: &'static [&'static str],
    layout_markers: &'static [&'static str],
}

const SIGNATURES: &[Signature] = &[
    Signature {
        receipt_type: ReceiptType::PharmacyColumn,
        chain_signals: &[
            "MERCURY DRUG",
            "ROSE PHARMACY",
            "GENERIKA",
            "WATSONS",
            "SOUTH STAR DRUG",
            "THE GENERICS PHARMACY",
            "FARMACIA",
            "BOTICA",
        ],
        layout_markers: &["PA#", "LESS: BP DISC", "LESS: SC DISC", "PHILLOGIX", "VAT REG TIN: 000-388"],
    },
    Signature {
        receipt_type: ReceiptType::Supermarket,
        chain_signals: &[
            "SM SUPERMARKET",
            "SM SAVEMORE",
            "PUREGOLD",
            "S&R MEMBERSHIP",
            "SHOPWISE",
            "ROBINSONS SUPERMARKET",
            "WALTER MART",
            "PRICE SMART",
            "LANDERS SUPERSTORE",
        ],
        layout_markers: &["ITEM(S)", "ITEMS PURCHAS", "PHP", "VINCOR NIXDORF", "MEMBER NAME", "MEMBER NANE"],
    },
    Signature {
        receipt_type: ReceiptType::FastFood,
        chain_signals: &[
            "JOLLIBEE",
            "MCDONALD'S",
            "CHOWKING",
            "MANG INASAL",
            "GREENWICH",
            "RED RIBBON",
            "BURGER KING",
            "PIZZA HUT",
            "KFC",
            "SUBWAY",
            "WENDY'S",
            "POPEYES",
            "SHAKEYS",
            "KENNY ROGER'S",
        ],
        layout_markers: &["ORDER#", "TABLE#", "DINE IN", "TAKE OUT", "DRIVE THRU", "CASHIER:"],
    },
    Signature {
        receipt_type: ReceiptType::DepartmentStore,
        chain_signals: &[
            "SM DEPARTMENT",
            "NATIONAL BOOKSTORE",
            "LANDMARK",
            "RUSTAN'S",
            "METRO GAISANO",
            "ROBINSONS DEPARTMENT",
            "KULTURA",
        ],
        layout_markers: &["ITEM CODE:", "DESCRIPTION QTY PRICE"],
    },
];

fn joined_upper(lines: &[String]) -> String {
    let mut joined = lines.join("\n").to_uppercase();
    joined.push('\n'); // ensures a trailing boundary for substring checks
    joined
}

/// Returns `(type, confidence)`.
pub fn classify(lines: &[String]) -> (ReceiptType, Confidence) {
    let joined = joined_upper(lines);

    for sig in SIGNATURES {
        if sig.chain_signals.iter().any(|s| joined.contains(s)) {
            return (sig.receipt_type, Confidence::High);
        }
    }
    for sig in SIGNATURES {
        if sig.layout_markers.iter().any(|m| joined.contains(m)) {
            return (sig.receipt_type, Confidence::High);
        }
    }

    let total = lines.len();
    if total == 0 {
        return (ReceiptType::Generic, Confidence::Low);
    }

    let standalone = lines.iter().filter(|l| patterns::PRICE_ONLY.is_match(l.trim())).count();
    let inline = lines
        .iter()
        .filter(|l| patterns::PRICE_INLINE.is_match(l.trim()) && !patterns::PRICE_ONLY.is_match(l.trim()))
        .count();

    let standalone_ratio = standalone as f64 / total as f64;
    let inline_ratio = inline as f64 / total as f64;

    if standalone_ratio >= 0.12 {
        (ReceiptType::PharmacyColumn, Confidence::Medium)
    } else if inline_ratio >= 0.18 {
        (ReceiptType::InlinePrice, Confidence::Medium)
    } else {
        (ReceiptType::Generic, Confidence::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_chain_signal_wins() {
        let (t, c) = classify(&lines(&["MERCURY DRUG", "PA#123", "100.00"]));
        assert_eq!(t, ReceiptType::PharmacyColumn);
        assert_eq!(c, Confidence::High);
    }

    #[test]
    fn test_layout_marker_wins_without_chain_signal() {
        let (t, c) = classify(&lines(&["SOME STORE", "ORDER#15", "TABLE#3"]));
        assert_eq!(t, ReceiptType::FastFood);
        assert_eq!(c, Confidence::High);
    }

    #[test]
    fn test_structural_fingerprint_pharmacy() {
        let many_prices: Vec<String> = (0..20).map(|_| "10.00".to_string()).collect();
        let mut all = vec!["UNKNOWN STORE".to_string()];
        all.extend(many_prices);
        let (t, c) = classify(&all);
        assert_eq!(t, ReceiptType::PharmacyColumn);
        assert_eq!(c, Confidence::Medium);
    }

    #[test]
    fn test_structural_fingerprint_generic_fallback() {
        let (t, c) = classify(&lines(&["SOME RANDOM STORE", "hello", "world"]));
        assert_eq!(t, ReceiptType::Generic);
        assert_eq!(c, Confidence::Low);
    }
}
