//! Custom error types for invoice-pay
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::time::Duration;

use thiserror::Error;

/// Why a remote procedure call did not produce a usable result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// The request never reached the server or the connection broke
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status
    #[error("HTTP status {0}")]
    Http(u16),

    /// The server raised an exception while running the procedure
    #[error("{name}: {message}")]
    Server { name: String, message: String },

    /// No response arrived within the configured timeout
    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The response could not be decoded into the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// The main error type for invoice-pay operations
#[derive(Error, Debug, Clone)]
pub enum InvoicePayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A remote procedure failed; carries the procedure name and the cause
    #[error("Remote call '{procedure}' failed: {cause}")]
    RemoteCallFailed {
        procedure: String,
        cause: RemoteFailure,
    },

    /// The server rejected the configured credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A dialog operation was attempted in the wrong lifecycle state
    #[error("Dialog error: {0}")]
    DialogState(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl InvoicePayError {
    /// Create a remote call failure for a procedure
    pub fn remote(procedure: impl Into<String>, cause: RemoteFailure) -> Self {
        Self::RemoteCallFailed {
            procedure: procedure.into(),
            cause,
        }
    }

    /// Create a "not found" error for invoices
    pub fn invoice_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Invoice",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from a remote procedure call
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteCallFailed { .. })
    }

    /// Name of the failed procedure, if this is a remote call failure
    pub fn procedure(&self) -> Option<&str> {
        match self {
            Self::RemoteCallFailed { procedure, .. } => Some(procedure),
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for InvoicePayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InvoicePayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for invoice-pay operations
pub type InvoicePayResult<T> = Result<T, InvoicePayError>;
