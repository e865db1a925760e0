//! T2: the top-level pipeline. Trim/drop-empty, classify, dispatch, extract,
//! validate, annotate (spec §4.T2).

use crate::classifier;
use crate::extractors::{self, base};
use crate::fields;
use crate::models::{Line, Record, ResiboConfig};
use crate::receipt_type::ReceiptType;
use crate::validator;

/// Runs the full pipeline over a sequence of OCR lines and returns the
/// structured record. Never fails: malformed or empty input yields a sparse
/// [`Record`] rather than an error (spec §7).
pub fn extract(lines: &[Line], config: &ResiboConfig) -> Record {
    let texts: Vec<String> = lines
        .iter()
        .map(|l| l.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if texts.is_empty() {
        return Record::empty();
    }

    let (receipt_type, receipt_type_confidence) = classifier::classify(&texts);

    let extractor = extractors::for_receipt_type(receipt_type);
    let mut items = extractor.extract(&texts);

    let supermarket = receipt_type == ReceiptType::Supermarket;
    let stated_item_count = fields::extract_stated_item_count(&texts, supermarket);
    if config.extraction.enable_stated_count_cap {
        items = base::apply_stated_count_cap(items, stated_item_count);
    }

    let store_name = fields::extract_store_name(&texts);
    let invoice_number = fields::extract_invoice_number(&texts);
    let date = fields::extract_date(&texts);
    let time = fields::extract_time(&texts);
    let total = fields::extract_total_amount(&texts);
    let vat = fields::extract_vat_amount(&texts);
    let tin = fields::extract_tin(&texts);

    let currency = &config.output.currency_symbol;
    let total_amount = total.map(|v| fields::total::format_currency(v, currency));
    let vat_amount = vat.map(|v| fields::total::format_currency(v, currency));
    let has_vat = vat.is_some();

    let item_count: u32 = items.iter().map(|it| it.qty).sum();

    let mut record = Record {
        store_name,
        invoice_number,
        date,
        time,
        total_amount,
        vat_amount,
        tin,
        item_count,
        has_vat,
        items,
        receipt_type,
        receipt_type_confidence,
        extraction_confidence: 0.0,
        extraction_warning: None,
    };

    if config.extraction.enable_orphan_inference {
        // Orphan inference already ran inside the pharmacy extractor itself
        // (it needs the raw zone/used-index bookkeeping); nothing to redo here.
    }

    if config.extraction.item_sum_tolerance > 0.0 {
        validator::validate(&mut record, total, config.extraction.item_sum_tolerance);
    }

    record.extraction_confidence = confidence_score(&record);

    record
}

/// Starts at 1.0 and subtracts a fixed penalty per missing field, floored at 0.
fn confidence_score(record: &Record) -> f32 {
    let mut score: f32 = 1.0;
    if record.store_name.is_none() {
        score -= 0.15;
    }
    if record.total_amount.is_none() {
        score -= 0.25;
    }
    if record.date.is_none() {
        score -= 0.10;
    }
    if record.items.is_empty() {
        score -= 0.20;
    }
    if record.invoice_number.is_none() {
        score -= 0.05;
    }
    score.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_record() {
        let record = extract(&[], &ResiboConfig::default());
        assert_eq!(record.items.len(), 0);
        assert_eq!(record.extraction_confidence, 0.0);
    }

    #[test]
    fn test_blank_lines_treated_as_empty() {
        let lines = Line::from_strs(["   ", "\t"]);
        let record = extract(&lines, &ResiboConfig::default());
        assert_eq!(record.items.len(), 0);
    }

    #[test]
    fn test_fast_food_receipt_end_to_end() {
        let lines = Line::from_strs([
            "JOLLIBEE",
            "ORDER#15",
            "2 PEACH MANGO PIE   69.00",
            "TOTAL",
            "69.00",
        ]);
        let record = extract(&lines, &ResiboConfig::default());
        assert_eq!(record.receipt_type, ReceiptType::FastFood);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].qty, 2);
        assert_eq!(record.total_amount.as_deref(), Some("₱69.00"));
        assert!(record.store_name.is_some());
    }

    #[test]
    fn test_confidence_penalizes_missing_fields() {
        let mut record = Record::empty();
        record.store_name = Some("X".to_string());
        assert_eq!(confidence_score(&record), 1.0 - 0.25 - 0.10 - 0.20 - 0.05);
    }

    #[test]
    fn test_stated_count_cap_applied_in_pipeline() {
        let lines = Line::from_strs([
            "SM SAVEMORE",
            "** 1 item(s) **",
            "BREAD   40.00",
            "MILK   90.00",
            "TOTAL",
            "40.00",
        ]);
        let record = extract(&lines, &ResiboConfig::default());
        assert_eq!(record.items.len(), 1);
    }
}
