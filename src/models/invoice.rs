//! Invoice model
//!
//! Read-only projection of a customer invoice as returned by `get_invoices`.
//! Invoices are fetched fresh on every list load and never modified locally.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields::optional_text;
use super::ids::InvoiceId;
use super::money::Money;

/// Posting state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    /// Not yet posted to the ledger
    #[default]
    Draft,
    /// Posted and awaiting payment
    Posted,
    /// Cancelled
    Cancel,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for InvoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Posted => write!(f, "Posted"),
            Self::Cancel => write!(f, "Cancelled"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Payment progress of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    #[default]
    NotPaid,
    Partial,
    InPayment,
    Paid,
    Reversed,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPaid => write!(f, "Not paid"),
            Self::Partial => write!(f, "Partial"),
            Self::InPayment => write!(f, "In payment"),
            Self::Paid => write!(f, "Paid"),
            Self::Reversed => write!(f, "Reversed"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// An outstanding customer invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Server identifier
    pub invoice_id: InvoiceId,

    /// Invoice number (absent on drafts)
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,

    /// Payment reference communicated to the customer
    #[serde(default, deserialize_with = "optional_text")]
    pub payment_reference: Option<String>,

    /// Customer name
    #[serde(default, deserialize_with = "optional_text")]
    pub partner_name: Option<String>,

    /// Invoice total
    #[serde(default)]
    pub amount_total: Money,

    /// Amount still due
    #[serde(default)]
    pub amount_residual: Money,

    /// Posting state
    #[serde(default)]
    pub state: InvoiceState,

    /// Payment progress
    #[serde(default)]
    pub payment_state: PaymentState,
}

impl Invoice {
    /// Create an invoice with the given id and residual (other fields empty)
    pub fn new(invoice_id: InvoiceId, amount_residual: Money) -> Self {
        Self {
            invoice_id,
            name: None,
            payment_reference: None,
            partner_name: None,
            amount_total: amount_residual,
            amount_residual,
            state: InvoiceState::Posted,
            payment_state: PaymentState::NotPaid,
        }
    }

    /// Label shown to the user: invoice number, else payment reference, else the id
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|name| *name != "/")
            .or(self.payment_reference.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Draft #{}", self.invoice_id.get()))
    }

    /// Customer name or a placeholder
    pub fn customer(&self) -> &str {
        self.partner_name.as_deref().unwrap_or("-")
    }

    /// Whether the invoice still needs posting
    pub fn is_draft(&self) -> bool {
        self.state == InvoiceState::Draft
    }

    /// Whether nothing remains to be paid
    pub fn is_paid(&self) -> bool {
        self.payment_state == PaymentState::Paid || self.amount_residual.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_row() {
        let json = r#"{
            "invoice_id": 17,
            "name": "INV/2025/00017",
            "payment_reference": false,
            "partner_name": "Azure Interior",
            "amount_total": 150.0,
            "amount_residual": 125.5,
            "state": "posted",
            "payment_state": "partial"
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.invoice_id, InvoiceId::new(17));
        assert_eq!(invoice.payment_reference, None);
        assert_eq!(invoice.amount_residual, Money::from_cents(12550));
        assert_eq!(invoice.state, InvoiceState::Posted);
        assert_eq!(invoice.payment_state, PaymentState::Partial);
        assert!(!invoice.is_draft());
        assert!(!invoice.is_paid());
    }

    #[test]
    fn test_deserialize_draft_with_unknown_states() {
        let json = r#"{
            "invoice_id": 3,
            "name": "/",
            "payment_reference": false,
            "partner_name": false,
            "amount_total": 20,
            "amount_residual": 20,
            "state": "draft",
            "payment_state": "blocked"
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert!(invoice.is_draft());
        assert_eq!(invoice.payment_state, PaymentState::Unknown);
        assert_eq!(invoice.display_name(), "Draft #3");
        assert_eq!(invoice.customer(), "-");
    }

    #[test]
    fn test_display_name_falls_back_to_reference() {
        let mut invoice = Invoice::new(InvoiceId::new(9), Money::from_cents(100));
        invoice.payment_reference = Some("REF-9".into());
        assert_eq!(invoice.display_name(), "REF-9");

        invoice.name = Some("INV/9".into());
        assert_eq!(invoice.display_name(), "INV/9");
    }
}
