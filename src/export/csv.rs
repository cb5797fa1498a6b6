//! CSV Export functionality

use std::io::Write;

use crate::error::{InvoicePayError, InvoicePayResult};
use crate::models::Invoice;

const HEADER: [&str; 8] = [
    "ID",
    "Number",
    "Reference",
    "Customer",
    "Total",
    "Residual",
    "State",
    "Payment State",
];

/// Export invoices to CSV, one row per invoice
pub fn export_invoices_csv<W: Write>(invoices: &[Invoice], writer: W) -> InvoicePayResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| InvoicePayError::Export(e.to_string());

    csv_writer.write_record(HEADER).map_err(export_err)?;

    for invoice in invoices {
        csv_writer
            .write_record([
                invoice.invoice_id.get().to_string(),
                invoice.name.clone().unwrap_or_default(),
                invoice.payment_reference.clone().unwrap_or_default(),
                invoice.partner_name.clone().unwrap_or_default(),
                invoice.amount_total.to_plain_string(),
                invoice.amount_residual.to_plain_string(),
                invoice.state.to_string(),
                invoice.payment_state.to_string(),
            ])
            .map_err(export_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| InvoicePayError::Export(e.to_string()))?;
    Ok(())
}
