//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer and the invoice workflow.

pub mod connection;
pub mod invoices;
pub mod journals;
pub mod modal;
pub mod session;

pub use connection::connect;
pub use invoices::{handle_invoice_command, InvoiceCommands, OutputFormat};
pub use journals::{handle_journal_command, JournalCommands};
pub use modal::AutoConfirmModal;
pub use session::{handle_session_command, SessionCommands};
