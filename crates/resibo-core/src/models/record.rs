//! The public extraction output.

use serde::{Deserialize, Serialize};

use crate::models::item::Item;
use crate::receipt_type::{Confidence, ReceiptType};

/// The structured result of extracting a single receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Verbatim as matched; no canonical form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Verbatim as matched; no canonical form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Formatted `"₱{n:,.2f}"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<String>,

    /// Formatted `"₱{n:,.2f}"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_amount: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tin: Option<String>,

    /// Sum of `qty` across items.
    pub item_count: u32,

    pub has_vat: bool,

    pub items: Vec<Item>,

    pub receipt_type: ReceiptType,

    pub receipt_type_confidence: Confidence,

    /// In `[0, 1]`.
    pub extraction_confidence: f32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_warning: Option<String>,
}

impl Record {
    /// An empty record, as returned for empty input (§7: not an error).
    pub fn empty() -> Self {
        Self {
            store_name: None,
            invoice_number: None,
            date: None,
            time: None,
            total_amount: None,
            vat_amount: None,
            tin: None,
            item_count: 0,
            has_vat: false,
            items: Vec::new(),
            receipt_type: ReceiptType::Generic,
            receipt_type_confidence: Confidence::Low,
            extraction_confidence: 0.0,
            extraction_warning: None,
        }
    }

    /// Presentation-layer completeness check, distinct from the pipeline's
    /// internal T1 validator: lists human-readable gaps for CLI `--validate`.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.store_name.is_none() {
            issues.push("Missing store name".to_string());
        }
        if self.total_amount.is_none() {
            issues.push("Missing total amount".to_string());
        }
        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }
        if let Some(warning) = &self.extraction_warning {
            issues.push(format!("Extraction warning: {warning}"));
        }

        issues
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_validate() {
        let record = Record::empty();
        let issues = record.validate();
        assert!(issues.contains(&"Missing store name".to_string()));
        assert!(issues.contains(&"No line items".to_string()));
    }
}
