//! Compiled regexes shared across the extraction pipeline (spec L1).
//!
//! All patterns are compiled once at first use and are read-only for the
//! lifetime of the process; no pass ever compiles a regex itself.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A line that is only dashes, asterisks, equals, dots, spaces, or a
    /// decorative `**anything**` banner.
    pub static ref SEPARATOR: Regex =
        Regex::new(r"^(?:[\-*=.\s]+|\*+.+\*+)$").unwrap();

    /// A standalone price line, optionally peso-prefixed and taxability-suffixed.
    pub static ref PRICE_ONLY: Regex =
        Regex::new(r"^\s*[₱P]?\s*\d[\d,]*\.\d{1,2}\s*[TXZVvy]?\s*$").unwrap();

    /// Name and price on one line, separated by 2+ spaces.
    pub static ref PRICE_INLINE: Regex =
        Regex::new(r"^(.+?)\s{2,}[₱P]?\s*(\d[\d,]*\.\d{2})[TXZ]?\s*$").unwrap();

    /// A 6-14 digit barcode / SKU, alone on its line.
    pub static ref BARCODE: Regex = Regex::new(r"^\d{6,14}$").unwrap();

    /// `3 @ 36.00` style quantity-times-unit-price line.
    pub static ref QTY_LINE: Regex =
        Regex::new(r"^(\d{1,4})\s*[@xX×]\s*(\d[\d,]*\.\d{2})\s*$").unwrap();

    /// Price line carrying a Philippine taxability suffix (taxable / exempt / zero-rated).
    pub static ref TAXED_PRICE: Regex =
        Regex::new(r"^\s*[₱P]?\s*(\d[\d,]*\.\d{2})[TXZ]\s*$").unwrap();

    // ---- Dates --------------------------------------------------------

    pub static ref DATE_MDY_4Y: Regex =
        Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap();
    pub static ref DATE_YMD_4Y: Regex =
        Regex::new(r"\b(\d{4})[/-](\d{1,2})[/-](\d{1,2})\b").unwrap();
    pub static ref DATE_WRITTEN_4Y: Regex = Regex::new(
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b"
    ).unwrap();
    pub static ref DATE_MDY_2Y: Regex =
        Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{2})\b").unwrap();
    pub static ref DATE_WRITTEN_2Y: Regex = Regex::new(
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{2})\b"
    ).unwrap();
    pub static ref DATE_MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{4})\b"
    ).unwrap();
    pub static ref DATE_DAY_MONTH_BARE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\b"
    ).unwrap();

    /// Words that indicate a nearby date is explicitly labelled rather than incidental.
    pub static ref DATE_CONTEXT_LABEL: Regex =
        Regex::new(r"(?i)\b(date|dated|issued|on|as of|for)\b").unwrap();

    /// `TXN#...` lines, the Mercury Drug embedded-date carrier.
    pub static ref TXN_PREFIX: Regex = Regex::new(r"(?i)^TXN#").unwrap();
    /// Dash-separated `MM-DD-YY` anywhere in a TXN line (formats A and B).
    pub static ref TXN_DATE_DASHED: Regex =
        Regex::new(r"(\d{2})-(\d{2})-(\d{2})").unwrap();
    /// Fully merged `MMDDYY` immediately followed by `HH:MM` (format C), once
    /// dashes have been stripped from the line.
    pub static ref TXN_DATE_MERGED: Regex =
        Regex::new(r"(\d{2})(\d{2})(\d{2})(\d{2}):(\d{2})").unwrap();

    // ---- Time -----------------------------------------------------------

    pub static ref TIME_HMS: Regex =
        Regex::new(r"(?i)\b(\d{1,2}):(\d{2}):(\d{2})\s*([AP]M?)?").unwrap();
    pub static ref TIME_HM: Regex =
        Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*([AP]M?)?\b").unwrap();

    // ---- Invoice number ---------------------------------------------------

    pub static ref INVOICE_SALESINVOICE: Regex =
        Regex::new(r"(?i)SALES\s*INVOICE\s*#?\s*:?\s*(\d{6,})").unwrap();
    pub static ref INVOICE_HASH: Regex =
        Regex::new(r"(?i)\bINVOICE\s*#\s*(\d{4,})").unwrap();
    pub static ref INVOICE_OR_SI: Regex =
        Regex::new(r"(?i)\b(?:OR|SI)\s*/?\s*SI\s*#\s*(\d{4,})|\bOR\s*#\s*(\d{4,})").unwrap();
    pub static ref INVOICE_SI_NO: Regex =
        Regex::new(r"(?i)\bSI\s*No\.?\s*:?\s*(\d{4,})").unwrap();
    pub static ref INVOICE_TXN: Regex =
        Regex::new(r"(?i)\bTXN\s*#\s*(\d{4,})").unwrap();
    pub static ref INVOICE_TRANSACTION_CONTROL: Regex = Regex::new(
        r"(?i)\b(?:TRANSACTION|CONTROL)\s*#?\s*:?\s*(\d{4,})"
    ).unwrap();

    // ---- Totals -----------------------------------------------------------

    pub static ref TOTAL_GRAND_TOTAL: Regex = Regex::new(
        r"(?i)\bGRAND\s*TOTAL\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_AMOUNT_DUE_FULL: Regex = Regex::new(
        r"(?i)\bTOTAL\s*AMOUNT\s*DUE\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_AMOUNT_DUE: Regex = Regex::new(
        r"(?i)\bAMOUNT\s*DUE\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_PAYMENT: Regex = Regex::new(
        r"(?i)\bTOTAL\s*PAYMENT\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_SALES: Regex = Regex::new(
        r"(?i)\bTOTAL\s*SALES\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_NET_AMOUNT: Regex = Regex::new(
        r"(?i)\bNET\s*AMOUNT\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_NET_SALES: Regex = Regex::new(
        r"(?i)\bNET\s*SALES\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref TOTAL_PLAIN: Regex = Regex::new(
        r"(?i)\bTOTAL\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();

    /// Standalone-line total keyword predicate for the split-line case.
    /// `SUBTOTAL` is intentionally excluded (it is pre-discount).
    pub static ref TOTAL_KW_PRIORITY: Regex = Regex::new(
        r"(?i)^(GRAND\s*TOTAL|TOTAL\s*AMOUNT\s*DUE|AMOUNT\s*DUE|TOTAL\s*PAYMENT|TOTAL\s*SALES|NET\s*AMOUNT|NET\s*SALES|TOTAL)\s*:?\s*$"
    ).unwrap();

    /// Financial closing keywords that end the item zone.
    pub static ref ZONE_END: Regex = Regex::new(
        r"(?i)^(SUB\s*TOTAL|SUBTOTAL|GRAND\s*TOTAL|CHANGE\s*DUE|CHANGE|AMOUNT\s*TENDERED|CASH\s*TENDERED|TOTAL\s*PAYMENT)\s*:?\-?\s*$"
    ).unwrap();

    /// Definitive financial keywords used to build the `skip_prices` set.
    pub static ref DEFINITIVE_FINANCIAL: Regex = Regex::new(
        r"(?i)^(CHANGE|CASH\s*TENDERED|AMOUNT\s*TENDERED|TOTAL\s*PAYMENT|TOTAL\s*AMOUNT|NET\s*AMOUNT|AMOUNT\s*DUE|GRAND\s*TOTAL|CASH|TOTAL\s*SALES)\s*:?\-?\s*$"
    ).unwrap();

    /// Any financial keyword appearing anywhere in the line, used only to
    /// decide pharmacy rescue-clause eligibility (broader than [`FINANCIAL_LINE`]).
    pub static ref FINANCIAL_KEYWORD_ANY: Regex = Regex::new(
        r"(?i)\b(TOTAL|CASH|CHANGE|VAT|TAX|DISCOUNT|AMOUNT|DUE|BALANCE|CREDIT|DEBIT|SUBTOTAL)\b"
    ).unwrap();

    /// A line that is wholly financial vocabulary (used by `is_name`).
    pub static ref FINANCIAL_LINE: Regex = Regex::new(
        r"(?i)^(SUBTOTAL|SUB\s*TOTAL|GRAND\s*TOTAL|TOTAL\s*AMOUNT|AMOUNT\s*DUE|TOTAL\s*PAYMENT|TOTAL\s*SALES|NET\s*AMOUNT|CASH\s*TENDERED|AMOUNT\s*TENDERED|CHANGE|BALANCE|CASH|DEBIT|CREDIT|VAT|TAX|DISCOUNT|TOTAL|VATABLE|VAT\s*EXEMPT|ZERO\s*RATED|OUTPUT\s*TAX)\s*[:\-₱P\d.]*\s*$"
    ).unwrap();

    // ---- VAT ----------------------------------------------------------

    pub static ref VAT_INLINE: Regex = Regex::new(
        r"(?i)\bVAT\s*-?\s*(?:\d{1,2}\s*%)?\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref VAT_PCT_FIRST: Regex = Regex::new(
        r"(?i)(\d{1,2})\s*%\s*VAT\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref VAT_OUTPUT_TAX: Regex = Regex::new(
        r"(?i)\bOUTPUT\s*TAX\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref VAT_AMOUNT_LABEL: Regex = Regex::new(
        r"(?i)\bVAT\s*AMOUNT\s*:?\s*[₱P]?\s*(\d[\d,]*\.\d{2})"
    ).unwrap();
    pub static ref VAT_KW: Regex = Regex::new(
        r"(?i)^(VAT(?:\s*-?\s*\d{1,2}\s*%)?|OUTPUT\s*TAX|VAT\s*AMOUNT)\s*:?\s*$"
    ).unwrap();

    // ---- TIN ------------------------------------------------------------

    pub static ref TIN_DASHED: Regex =
        Regex::new(r"\b(\d{3}-\d{3}-\d{3}-\d{5})\b").unwrap();
    pub static ref TIN_PLAIN: Regex = Regex::new(r"\b(\d{12,14})\b").unwrap();
    pub static ref TIN_LABEL: Regex = Regex::new(r"(?i)\bTIN\b").unwrap();

    /// Payment-mode indicator lines (cash / card / e-wallet tender lines).
    pub static ref PAYMENT_LINE: Regex = Regex::new(
        r"(?i)^(CASH|CREDIT\s*CARD|DEBIT\s*CARD|GCASH|MAYA|PAYMAYA|CHARGE|CHECK|CHEQUE|E-?WALLET)\s*:?\-?\s*$"
    ).unwrap();

    // ---- Stated item count ------------------------------------------------

    pub static ref ITEM_COUNT_LINE: Regex = Regex::new(
        r"(?i)\*+\s*(\d+)\s*item(?:s|\(s\))?\s*\*+"
    ).unwrap();
    pub static ref ITEM_COUNT_SPLIT_OPEN: Regex = Regex::new(r"^\*+\s*$").unwrap();
    pub static ref ITEM_COUNT_SPLIT_MIDDLE: Regex =
        Regex::new(r"(?i)^(\d+)\s*item(?:s|\(s\))?\s*$").unwrap();
    pub static ref ITEMS_PURCHASED: Regex =
        Regex::new(r"(?i)\bITEMS?\s*PURCHASED\s*:?\s*(\d+)").unwrap();

    // ---- Store name ------------------------------------------------------

    pub static ref ALL_DIGITS: Regex = Regex::new(r"^\d+$").unwrap();

    /// Pharmacy prescription-mode marker (`PA#12345`, `PA99S/S`, `PA 99 S/S`).
    /// The `#` and the `S/S` suffix are both optional.
    pub static ref PA_MODE_MARKER: Regex =
        Regex::new(r"(?i)^PA\s*#?\s*\d+\s*(S/S)?$").unwrap();
}

/// Uppercase the text and apply the narrow OCR-confusion substitution used
/// *only* for matching financial keywords (`0→O 1→I |→I 5→S 8→B 6→G`).
/// Never applied to preserved product text.
pub fn normalize_for_keyword_match(s: &str) -> String {
    s.to_uppercase()
        .chars()
        .map(|c| match c {
            '0' => 'O',
            '1' => 'I',
            '|' => 'I',
            '5' => 'S',
            '8' => 'B',
            '6' => 'G',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator() {
        assert!(SEPARATOR.is_match("-----"));
        assert!(SEPARATOR.is_match("*** PROMO ***"));
        assert!(!SEPARATOR.is_match("MERCURY DRUG"));
    }

    #[test]
    fn test_price_only() {
        assert!(PRICE_ONLY.is_match("1220.00T"));
        assert!(PRICE_ONLY.is_match("₱1,310.00"));
        assert!(!PRICE_ONLY.is_match("3 @ 36.00"));
    }

    #[test]
    fn test_price_inline() {
        let caps = PRICE_INLINE.captures("JOLLIBEE BURGER   65.00").unwrap();
        assert_eq!(&caps[1], "JOLLIBEE BURGER");
        assert_eq!(&caps[2], "65.00");
    }

    #[test]
    fn test_barcode() {
        assert!(BARCODE.is_match("480036140523"));
        assert!(!BARCODE.is_match("12345"));
    }

    #[test]
    fn test_qty_line() {
        let caps = QTY_LINE.captures("4 @ 299.00").unwrap();
        assert_eq!(&caps[1], "4");
        assert_eq!(&caps[2], "299.00");
    }

    #[test]
    fn test_normalize_for_keyword_match() {
        assert_eq!(normalize_for_keyword_match("t0tal"), "TOTAL");
    }

    #[test]
    fn test_pa_mode_marker() {
        assert!(PA_MODE_MARKER.is_match("PA#12345"));
        assert!(PA_MODE_MARKER.is_match("PA99S/S"));
        assert!(PA_MODE_MARKER.is_match("pa 99 s/s"));
        assert!(!PA_MODE_MARKER.is_match("PANDESAL"));
    }
}
