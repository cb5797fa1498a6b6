//! Terminal User Interface module
//!
//! Hosts the invoice workflow in a ratatui interface: a home screen with the
//! Invoices button, the invoice list and the payment registration modal.
//! The workflow itself runs on the tokio runtime; this module only sends it
//! commands and renders what it reports.

pub mod app;
pub mod commands;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod keybindings;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
