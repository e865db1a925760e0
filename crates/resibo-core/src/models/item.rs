//! A single extracted line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single line item recovered from the receipt.
///
/// Construction invariants (upheld by the item extractors, not re-checked
/// here): `price > 0`; `sku`, when present, is all-digits length 6..=14.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Product name, with any qty prefix/suffix stripped.
    pub name: String,

    /// Line total for this item, rounded to 2 places.
    pub price: Decimal,

    /// Quantity; defaults to 1 when not explicitly recovered.
    pub qty: u32,

    /// Unit price, only set when recovered from a `"N @ P"` line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// 6-14 digit barcode, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// OCR line index of the item's name line. Used only to sort items into
    /// receipt order; never serialized as part of the public record.
    #[serde(skip)]
    pub source_index: usize,
}

impl Item {
    /// Build an item from its required fields.
    pub fn new(name: impl Into<String>, price: Decimal, source_index: usize) -> Self {
        Self {
            name: name.into(),
            price,
            qty: 1,
            unit_price: None,
            sku: None,
            source_index,
        }
    }

    /// Attach a recovered quantity.
    pub fn with_qty(mut self, qty: u32) -> Self {
        if qty > 0 {
            self.qty = qty;
        }
        self
    }

    /// Attach a recovered unit price.
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    /// Attach a barcode, when it matches the 6-14 digit shape.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        let sku = sku.into();
        if sku.len() >= 6 && sku.len() <= 14 && sku.bytes().all(|b| b.is_ascii_digit()) {
            self.sku = Some(sku);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_build_item() {
        let item = Item::new("NIDO5+PDR MLK2kg", Decimal::from_str("1220.00").unwrap(), 4)
            .with_sku("480036140523");
        assert_eq!(item.qty, 1);
        assert_eq!(item.sku.as_deref(), Some("480036140523"));
    }

    #[test]
    fn test_invalid_sku_rejected() {
        let item = Item::new("X", Decimal::from_str("1.00").unwrap(), 0).with_sku("123");
        assert_eq!(item.sku, None);
    }

    #[test]
    fn test_with_qty_zero_ignored() {
        let item = Item::new("X", Decimal::from_str("1.00").unwrap(), 0).with_qty(0);
        assert_eq!(item.qty, 1);
    }
}
