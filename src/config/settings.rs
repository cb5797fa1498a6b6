//! User settings for invoice-pay
//!
//! Manages the server connection, the point-of-sale context passed along with
//! payments, and display preferences.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::InvoicePayPaths;
use crate::error::InvoicePayError;
use crate::models::{ConfigId, PosContext, SessionId};

/// Connection settings for the ERP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the server (e.g. "http://localhost:8069")
    #[serde(default = "default_url")]
    pub url: String,

    /// Database to authenticate against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Login of the POS user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    /// Seconds to wait for any single remote call
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_url(),
            database: None,
            login: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerSettings {
    /// Timeout applied to every remote call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Point-of-sale context sent with every payment registration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PosSettings {
    /// The open POS session (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,

    /// The POS configuration (if known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<ConfigId>,
}

impl PosSettings {
    /// The context attached to payment registrations
    pub fn context(&self) -> PosContext {
        PosContext::new(self.session_id, self.config_id)
    }
}

/// User settings for invoice-pay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Server connection
    #[serde(default)]
    pub server: ServerSettings,

    /// POS context
    #[serde(default)]
    pub pos: PosSettings,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Log filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Values supplied on the command line or through the environment
///
/// Every field that is `Some` replaces the persisted setting for this run.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub url: Option<String>,
    pub database: Option<String>,
    pub login: Option<String>,
    pub session_id: Option<SessionId>,
    pub config_id: Option<ConfigId>,
    pub timeout_secs: Option<u64>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_url() -> String {
    "http://localhost:8069".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            server: ServerSettings::default(),
            pos: PosSettings::default(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &InvoicePayPaths) -> Result<Self, InvoicePayError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                InvoicePayError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                InvoicePayError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &InvoicePayPaths) -> Result<(), InvoicePayError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            InvoicePayError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            InvoicePayError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Apply command line / environment overrides on top of the persisted values
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        if let Some(url) = overrides.url {
            self.server.url = url;
        }
        if let Some(database) = overrides.database {
            self.server.database = Some(database);
        }
        if let Some(login) = overrides.login {
            self.server.login = Some(login);
        }
        if let Some(session_id) = overrides.session_id {
            self.pos.session_id = Some(session_id);
        }
        if let Some(config_id) = overrides.config_id {
            self.pos.config_id = Some(config_id);
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.server.request_timeout_secs = timeout;
        }
    }

    /// Check that enough is configured to authenticate against the server
    pub fn validate_connection(&self) -> Result<(), InvoicePayError> {
        if self.server.url.trim().is_empty() {
            return Err(InvoicePayError::Config("Server URL is empty".into()));
        }
        if self.server.database.as_deref().map_or(true, str::is_empty) {
            return Err(InvoicePayError::Config(
                "No database configured. Use --db or INVOICE_PAY_DB".into(),
            ));
        }
        if self.server.login.as_deref().map_or(true, str::is_empty) {
            return Err(InvoicePayError::Config(
                "No login configured. Use --login or INVOICE_PAY_LOGIN".into(),
            ));
        }
        Ok(())
    }
}
