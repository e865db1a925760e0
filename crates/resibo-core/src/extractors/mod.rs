//! M2: the multi-pass item extraction engine. One [`ItemExtractor`]
//! implementation per receipt layout, dispatched through [`for_receipt_type`]
//! (spec §4.M2; grounded on the Python `ExtractorFactory`).

pub mod base;
pub mod department_store;
pub mod fast_food;
pub mod generic;
pub mod inline_price;
pub mod pharmacy;
pub mod supermarket;

use crate::models::Item;
use crate::receipt_type::ReceiptType;

/// Implemented once per receipt layout; shares the skeleton in [`base`].
pub trait ItemExtractor {
    /// Items found in `lines`, sorted by their source line index.
    fn extract(&self, lines: &[String]) -> Vec<Item>;
}

/// Maps a [`ReceiptType`] to its extractor. Unknown/unclassified types fall
/// back to the conservative [`generic::GenericExtractor`].
pub fn for_receipt_type(receipt_type: ReceiptType) -> Box<dyn ItemExtractor> {
    match receipt_type {
        ReceiptType::PharmacyColumn => Box::new(pharmacy::PharmacyColumnExtractor),
        ReceiptType::Supermarket => Box::new(supermarket::SupermarketExtractor),
        ReceiptType::FastFood => Box::new(fast_food::FastFoodExtractor),
        ReceiptType::DepartmentStore => Box::new(department_store::DepartmentStoreExtractor),
        ReceiptType::InlinePrice => Box::new(inline_price::InlinePriceExtractor),
        ReceiptType::Generic => Box::new(generic::GenericExtractor),
    }
}
