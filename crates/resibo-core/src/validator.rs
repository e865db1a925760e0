//! T1: post-extraction sanity checks, not a gate — extraction never fails.

use rust_decimal::Decimal;

use crate::models::Record;

/// Discounts of 5-30% are normal, so the tolerance is deliberately loose;
/// this flags gross parsing errors only.
pub const ITEM_SUM_TOLERANCE: f64 = 1.5;

/// Checks item-sum-vs-total and records the stated item count. Mutates
/// `record` in place; never rejects it.
pub fn validate(record: &mut Record, total: Option<Decimal>, tolerance: f64) {
    if let Some(total) = total {
        let item_sum: Decimal = record.items.iter().map(|it| it.price * Decimal::from(it.qty)).sum();
        let threshold = total * Decimal::try_from(tolerance).unwrap_or(Decimal::new(15, 1));
        if item_sum > threshold {
            record.extraction_warning = Some("item_sum_exceeds_total".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;
    use std::str::FromStr;

    #[test]
    fn test_validate_flags_gross_overage() {
        let mut record = Record::empty();
        record.items.push(Item::new("X", Decimal::from_str("500.00").unwrap(), 0));
        validate(&mut record, Some(Decimal::from_str("100.00").unwrap()), ITEM_SUM_TOLERANCE);
        assert_eq!(record.extraction_warning.as_deref(), Some("item_sum_exceeds_total"));
    }

    #[test]
    fn test_validate_tolerates_normal_discount() {
        let mut record = Record::empty();
        record.items.push(Item::new("X", Decimal::from_str("90.00").unwrap(), 0));
        validate(&mut record, Some(Decimal::from_str("100.00").unwrap()), ITEM_SUM_TOLERANCE);
        assert_eq!(record.extraction_warning, None);
    }
}
