//! Payment registration values
//!
//! `DialogResult` is what the payment dialog hands back to its caller;
//! `PaymentRequest` is what gets sent to the server when the result is
//! confirmed.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::ids::{ConfigId, InvoiceId, JournalId, SessionId};
use super::money::Money;

/// The point-of-sale context a payment is registered from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosContext {
    pub session_id: Option<SessionId>,
    pub config_id: Option<ConfigId>,
}

impl PosContext {
    pub fn new(session_id: Option<SessionId>, config_id: Option<ConfigId>) -> Self {
        Self {
            session_id,
            config_id,
        }
    }
}

/// Outcome of a payment dialog
///
/// A cancelled result carries neither amount nor journal, so callers cannot
/// accidentally read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Confirmed {
        amount: Money,
        journal_id: Option<JournalId>,
    },
    Cancelled,
}

impl DialogResult {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// A payment registration about to be sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub invoice_id: InvoiceId,
    pub journal_id: Option<JournalId>,
    pub amount: Money,
    pub session_id: Option<SessionId>,
    pub config_id: Option<ConfigId>,
}

impl PaymentRequest {
    /// Build the request for a confirmed dialog result, or `None` if it was cancelled
    pub fn from_result(invoice_id: InvoiceId, result: DialogResult, context: PosContext) -> Option<Self> {
        match result {
            DialogResult::Confirmed { amount, journal_id } => Some(Self {
                invoice_id,
                journal_id,
                amount,
                session_id: context.session_id,
                config_id: context.config_id,
            }),
            DialogResult::Cancelled => None,
        }
    }

    /// Positional arguments in the order `pos_register_payment` expects
    pub fn positional_args(&self) -> Vec<Value> {
        vec![
            json!(self.invoice_id),
            json!(self.journal_id),
            json!(self.amount),
            json!(self.session_id),
            json!(self.config_id),
        ]
    }
}

/// What `register_payment` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Registered(PaymentRequest),
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_result_builds_no_request() {
        let request = PaymentRequest::from_result(
            InvoiceId::new(1),
            DialogResult::Cancelled,
            PosContext::default(),
        );
        assert!(request.is_none());
    }

    #[test]
    fn test_positional_args_order() {
        let request = PaymentRequest::from_result(
            InvoiceId::new(1),
            DialogResult::Confirmed {
                amount: Money::from_cents(5000),
                journal_id: Some(JournalId::new(9)),
            },
            PosContext::new(Some(SessionId::new(4)), Some(ConfigId::new(2))),
        )
        .unwrap();

        assert_eq!(
            Value::Array(request.positional_args()),
            json!([1, 9, 50.0, 4, 2])
        );
    }

    #[test]
    fn test_residual_is_sent_back_unrounded() {
        let residual: Money = serde_json::from_value(json!(12.345)).unwrap();
        let request = PaymentRequest::from_result(
            InvoiceId::new(1),
            DialogResult::Confirmed {
                amount: residual,
                journal_id: Some(JournalId::new(9)),
            },
            PosContext::default(),
        )
        .unwrap();

        assert_eq!(request.positional_args()[2], json!(12.345));
    }

    #[test]
    fn test_missing_context_is_null() {
        let request = PaymentRequest::from_result(
            InvoiceId::new(8),
            DialogResult::Confirmed {
                amount: Money::from_cents(1999),
                journal_id: None,
            },
            PosContext::default(),
        )
        .unwrap();

        assert_eq!(
            Value::Array(request.positional_args()),
            json!([8, null, 19.99, null, null])
        );
    }
}
