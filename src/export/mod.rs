//! Export module for invoice-pay
//!
//! Writes the current invoice list in several formats:
//! - CSV: one row per invoice (spreadsheet-compatible)
//! - JSON: machine-readable export with metadata
//! - YAML: the same export, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_invoices_csv;
pub use json::{export_invoices_json, InvoiceExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_invoices_yaml;
