//! JSON Export functionality
//!
//! Exports the invoice list with the POS context it was fetched for.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InvoicePayError, InvoicePayResult};
use crate::models::{ConfigId, Invoice, Money, PosContext, SessionId};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Invoice list export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// POS session the list was fetched from
    pub session_id: Option<SessionId>,

    /// POS configuration the list was fetched from
    pub config_id: Option<ConfigId>,

    /// Sum of the residual amounts
    pub total_residual: Money,

    /// The invoices, in server order
    pub invoices: Vec<Invoice>,
}

impl InvoiceExport {
    pub fn new(invoices: Vec<Invoice>, context: PosContext) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            session_id: context.session_id,
            config_id: context.config_id,
            total_residual: invoices.iter().map(|invoice| invoice.amount_residual).sum(),
            invoices,
        }
    }
}

/// Export the invoice list to JSON
pub fn export_invoices_json<W: Write>(
    export: &InvoiceExport,
    writer: &mut W,
    pretty: bool,
) -> InvoicePayResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| InvoicePayError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceId;

    #[test]
    fn test_export_json() {
        let invoices = vec![
            Invoice::new(InvoiceId::new(1), Money::from_cents(5000)),
            Invoice::new(InvoiceId::new(2), Money::from_cents(1250)),
        ];
        let export = InvoiceExport::new(invoices, PosContext::new(Some(SessionId::new(4)), None));

        let mut output = Vec::new();
        export_invoices_json(&export, &mut output, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], "1.0.0");
        assert_eq!(value["session_id"], 4);
        assert!(value["config_id"].is_null());
        assert_eq!(value["total_residual"], 62.5);
        assert_eq!(value["invoices"][1]["invoice_id"], 2);
    }

    #[test]
    fn test_export_reads_back() {
        let export = InvoiceExport::new(
            vec![Invoice::new(InvoiceId::new(7), Money::from_cents(999))],
            PosContext::default(),
        );

        let mut output = Vec::new();
        export_invoices_json(&export, &mut output, true).unwrap();

        let parsed: InvoiceExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.invoices, export.invoices);
        assert_eq!(parsed.total_residual, Money::from_cents(999));
    }
}
