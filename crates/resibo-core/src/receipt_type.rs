//! Receipt layout classification result.

use serde::{Deserialize, Serialize};

/// The receipt layout family, as determined by the classifier (§4.M1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptType {
    /// Mercury Drug and similar pharmacy chains; price column precedes the
    /// item-name column in OCR reading order.
    PharmacyColumn,
    /// Supermarkets (SM Supermarket, Puregold, S&R, ...).
    Supermarket,
    /// Fast-food counters (Jollibee, McDonald's, ...).
    FastFood,
    /// Department stores (SM Department, National Bookstore, ...).
    DepartmentStore,
    /// Unknown store, but structural fingerprinting found an inline layout.
    InlinePrice,
    /// Safe fallback: unknown store, no confident layout signal.
    Generic,
}

impl Default for ReceiptType {
    fn default() -> Self {
        ReceiptType::Generic
    }
}

impl ReceiptType {
    /// Stable lowercase identifier, e.g. for factory dispatch and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptType::PharmacyColumn => "pharmacy_column",
            ReceiptType::Supermarket => "supermarket",
            ReceiptType::FastFood => "fast_food",
            ReceiptType::DepartmentStore => "department_store",
            ReceiptType::InlinePrice => "inline_price",
            ReceiptType::Generic => "generic",
        }
    }
}

/// Confidence band reported alongside a [`ReceiptType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}
