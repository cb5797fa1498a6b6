//! Dialog modules for the TUI

pub mod command_palette;
pub mod help;
pub mod payment;

pub use payment::PaymentForm;
