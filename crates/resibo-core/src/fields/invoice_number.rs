//! `invoice_number`: two-pass scan so a co-located `TXN#` never outranks the
//! real invoice/OR number (spec §4.L3).

use crate::patterns;

/// Patterns tried in pass 1, ordered by specificity; `TXN#` and
/// `TRANSACTION`/`CONTROL` are withheld for pass 2.
fn pass_one(line: &str) -> Option<String> {
    for re in [
        &*patterns::INVOICE_SALESINVOICE,
        &*patterns::INVOICE_HASH,
        &*patterns::INVOICE_OR_SI,
        &*patterns::INVOICE_SI_NO,
    ] {
        if let Some(caps) = re.captures(line) {
            let value = caps
                .iter()
                .skip(1)
                .find_map(|m| m.map(|m| m.as_str().to_string()));
            if value.is_some() {
                return value;
            }
        }
    }
    None
}

fn pass_two(line: &str) -> Option<String> {
    if let Some(caps) = patterns::INVOICE_TXN.captures(line) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = patterns::INVOICE_TRANSACTION_CONTROL.captures(line) {
        return Some(caps[1].to_string());
    }
    None
}

pub fn extract_invoice_number(lines: &[String]) -> Option<String> {
    for line in lines {
        if let Some(v) = pass_one(line) {
            return Some(v);
        }
    }
    for line in lines {
        if let Some(v) = pass_two(line) {
            return Some(v);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_prefers_invoice_over_txn() {
        let lines = vec![
            "INVOICE#110703137533".to_string(),
            "TXN#110855".to_string(),
        ];
        assert_eq!(extract_invoice_number(&lines), Some("110703137533".to_string()));
    }

    #[test]
    fn test_invoice_number_falls_back_to_txn() {
        let lines = vec!["TXN#071432".to_string()];
        assert_eq!(extract_invoice_number(&lines), Some("071432".to_string()));
    }

    #[test]
    fn test_invoice_number_none() {
        let lines = vec!["MERCURY DRUG".to_string()];
        assert_eq!(extract_invoice_number(&lines), None);
    }
}
