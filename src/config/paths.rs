//! Path management for invoice-pay
//!
//! Provides XDG-compliant path resolution for the settings and log files.
//!
//! ## Path Resolution Order
//!
//! 1. `INVOICE_PAY_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/invoice-pay` or `~/.config/invoice-pay`
//! 3. Windows: `%APPDATA%\invoice-pay`

use std::path::PathBuf;

use crate::error::InvoicePayError;

/// Environment variable overriding the base directory
pub const CONFIG_DIR_ENV: &str = "INVOICE_PAY_CONFIG_DIR";

/// Manages all paths used by invoice-pay
#[derive(Debug, Clone)]
pub struct InvoicePayPaths {
    /// Base directory for all invoice-pay files
    base_dir: PathBuf,
}

impl InvoicePayPaths {
    /// Create a new InvoicePayPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, InvoicePayError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create InvoicePayPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/invoice-pay/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file written while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("invoice-pay.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), InvoicePayError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| InvoicePayError::Io(format!("Failed to create config directory: {}", e)))?;

        Ok(())
    }

    /// Check if invoice-pay has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, InvoicePayError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| InvoicePayError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("invoice-pay"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, InvoicePayError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| InvoicePayError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("invoice-pay"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = InvoicePayPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.log_file(), temp_dir.path().join("invoice-pay.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("invoice-pay");
        let paths = InvoicePayPaths::with_base_dir(base.clone());

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();

        assert!(base.exists());
    }
}
