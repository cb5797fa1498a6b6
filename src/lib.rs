//! invoice-pay - Pay customer invoices from a point-of-sale session
//!
//! This library drives the invoice payment workflow of a point-of-sale
//! terminal against an ERP server: list the outstanding invoices, post
//! drafts, and register payments through a payment dialog.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `workflow`: Invoices button, invoice list coordinator, payment dialog
//!   and the task that runs them for interactive hosts
//! - `rpc`: JSON-RPC client and the remote procedure contracts
//! - `services`: Typed wrappers over the remote procedures
//! - `models`: Invoices, journals, payments, money and ids
//! - `config`: Settings, paths and credentials
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `cli`, `display`, `export`: Command-line front end
//! - `tui`: Terminal user interface
//!
//! # Example
//!
//! ```rust,ignore
//! use pos_invoice_pay::services::InvoiceService;
//! use pos_invoice_pay::workflow::{InvoiceListCoordinator, InvoicesButton, NavigationStack};
//!
//! let mut navigator = NavigationStack::new();
//! InvoicesButton.activate(&mut navigator);
//! let mut list = InvoiceListCoordinator::initialize(
//!     InvoiceService::new(client),
//!     navigator,
//!     modal,
//!     settings.pos.context(),
//! )
//! .await?;
//! list.pay_invoice(invoice_id).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod rpc;
pub mod services;
pub mod tui;
pub mod workflow;

pub use error::{InvoicePayError, InvoicePayResult};
