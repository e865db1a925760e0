//! Core library for Philippine retail receipt OCR post-processing.
//!
//! This crate provides:
//! - Receipt layout classification (pharmacy, supermarket, fast food,
//!   department store, or a generic inline fallback)
//! - Layout-agnostic field extraction (store name, date, time, invoice
//!   number, totals, VAT, TIN)
//! - A multi-pass line-item extraction engine, one strategy per layout
//! - Post-extraction validation and confidence scoring

pub mod classify;
pub mod classifier;
pub mod error;
pub mod extractors;
pub mod fields;
pub mod models;
pub mod orchestrator;
pub mod patterns;
pub mod receipt_type;
pub mod repair;
pub mod validator;

pub use error::{ConfigError, LineSourceError, ResiboError, Result};
pub use models::{Item, Line, Record, ResiboConfig};
pub use orchestrator::extract;
pub use receipt_type::{Confidence, ReceiptType};
