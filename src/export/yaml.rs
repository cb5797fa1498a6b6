//! YAML Export functionality

use std::io::Write;

use crate::error::{InvoicePayError, InvoicePayResult};
use crate::export::json::InvoiceExport;

/// Export the invoice list to YAML
pub fn export_invoices_yaml<W: Write>(export: &InvoiceExport, writer: &mut W) -> InvoicePayResult<()> {
    writeln!(writer, "# invoice-pay invoice export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| InvoicePayError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| InvoicePayError::Export(e.to_string()))?;

    Ok(())
}
