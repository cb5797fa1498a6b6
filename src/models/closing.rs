//! Session closing summary
//!
//! When a POS session closes, the server's closing data carries two extra
//! fields listing the invoices paid from that session. They are declared here
//! as this crate's own schema and decoded out of the full closing payload.

use serde::{Deserialize, Serialize};

use super::fields::optional_text;
use super::money::Money;

/// Fields added to the session closing data by invoice payments
pub const CLOSING_EXTRA_FIELDS: [&str; 2] = ["invoice_paid_lines", "invoice_paid_total"];

/// One invoice payment logged against the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePaidLine {
    pub id: i64,
    #[serde(default, deserialize_with = "optional_text")]
    pub name: Option<String>,
    pub amount: Money,
}

/// Invoice payments made during one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClosingInvoiceSummary {
    #[serde(default)]
    pub invoice_paid_lines: Vec<InvoicePaidLine>,
    #[serde(default)]
    pub invoice_paid_total: Money,
}

impl ClosingInvoiceSummary {
    pub fn is_empty(&self) -> bool {
        self.invoice_paid_lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_other_closing_fields() {
        let json = r#"{
            "orders_details": {"quantity": 3, "amount": 42.0},
            "default_cash_details": null,
            "invoice_paid_lines": [
                {"id": 2, "name": "INV/2025/0002", "amount": 20.0},
                {"id": 1, "name": false, "amount": 5.5}
            ],
            "invoice_paid_total": 25.5
        }"#;

        let summary: ClosingInvoiceSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.invoice_paid_lines.len(), 2);
        assert_eq!(summary.invoice_paid_lines[1].name, None);
        assert_eq!(summary.invoice_paid_total, Money::from_cents(2550));
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let summary: ClosingInvoiceSummary = serde_json::from_str("{}").unwrap();
        assert!(summary.is_empty());
        assert!(summary.invoice_paid_total.is_zero());
    }
}
