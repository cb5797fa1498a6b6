//! Display formatting for terminal output
//!
//! Formats invoices, journals and session summaries as plain-text tables for
//! the non-interactive commands.

pub mod closing;
pub mod invoice;
pub mod journal;
pub mod sale_details;

pub use closing::format_closing_summary;
pub use invoice::{format_invoice_details, format_invoice_list};
pub use journal::format_journal_list;
pub use sale_details::format_sale_details;
