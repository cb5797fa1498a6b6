//! Core data models for invoice-pay
//!
//! This module contains the data structures exchanged with the server:
//! invoices, journals, payment requests, the session closing summary and
//! the invoice part of the sale details report.

pub mod closing;
pub mod fields;
pub mod ids;
pub mod invoice;
pub mod journal;
pub mod money;
pub mod payment;
pub mod sale_details;

pub use closing::{ClosingInvoiceSummary, InvoicePaidLine, CLOSING_EXTRA_FIELDS};
pub use ids::{ConfigId, InvoiceId, JournalId, SessionId};
pub use invoice::{Invoice, InvoiceState, PaymentState};
pub use journal::Journal;
pub use money::{Money, MoneyParseError};
pub use payment::{DialogResult, PaymentOutcome, PaymentRequest, PosContext};
pub use sale_details::{SaleDetailsInvoices, SaleDetailsScope, SessionInvoicePayments, SessionPaidLine};
