//! Configuration module for invoice-pay
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Server connection and POS context settings
//! - Credential handling

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::Password;
pub use paths::InvoicePayPaths;
pub use settings::{PosSettings, ServerSettings, SettingsOverrides, Settings};
