//! Server password handling
//!
//! The password is never written to the settings file. It comes from the
//! command line, the `INVOICE_PAY_PASSWORD` environment variable, or an
//! interactive prompt, and is wiped from memory when dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{InvoicePayError, InvoicePayResult};

/// A password that is zeroed when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wrap an existing secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Use the given value, or prompt on the terminal when absent
    pub fn resolve(given: Option<String>, login: &str) -> InvoicePayResult<Self> {
        match given {
            Some(secret) if !secret.is_empty() => Ok(Self(secret)),
            _ => prompt_password(&format!("Password for {}: ", login)),
        }
    }

    /// Expose the secret for sending to the server
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> InvoicePayResult<Password> {
    rpassword::prompt_password(prompt)
        .map(Password)
        .map_err(|e| InvoicePayError::Config(format!("Failed to read password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let password = Password::new("hunter2");
        assert_eq!(format!("{:?}", password), "Password(***)");
        assert_eq!(password.expose(), "hunter2");
    }

    #[test]
    fn test_resolve_uses_given_value() {
        let password = Password::resolve(Some("s3cret".into()), "cashier").unwrap();
        assert_eq!(password.expose(), "s3cret");
    }
}
