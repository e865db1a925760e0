//! Layout-agnostic field extractors (spec §4.L3). Each submodule follows the
//! same shape as the teacher's invoice rule extractors: a struct implementing
//! a small trait plus a free `extract_*` convenience function.

pub mod date;
pub mod invoice_number;
pub mod stated_item_count;
pub mod store_name;
pub mod time;
pub mod total;
pub mod tin;
pub mod vat;

pub use date::extract_date;
pub use invoice_number::extract_invoice_number;
pub use stated_item_count::extract_stated_item_count;
pub use store_name::extract_store_name;
pub use time::extract_time;
pub use tin::extract_tin;
pub use total::extract_total_amount;
pub use vat::extract_vat_amount;
