//! Invoice display formatting
//!
//! Formats invoices for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Invoice, Money};

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Invoice")]
    name: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Due")]
    residual: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Payment")]
    payment_state: String,
}

impl InvoiceRow {
    fn new(invoice: &Invoice, currency: &str) -> Self {
        let state = if invoice.is_draft() {
            "Draft (post first)".to_string()
        } else {
            invoice.state.to_string()
        };
        Self {
            id: invoice.invoice_id.get(),
            name: invoice.display_name(),
            customer: invoice.customer().to_string(),
            total: invoice.amount_total.format_with_symbol(currency),
            residual: invoice.amount_residual.format_with_symbol(currency),
            state,
            payment_state: invoice.payment_state.to_string(),
        }
    }
}

/// Format the invoice list as a table followed by the total due
pub fn format_invoice_list(invoices: &[Invoice], currency: &str) -> String {
    if invoices.is_empty() {
        return "No outstanding invoices.\n".to_string();
    }

    let rows = invoices.iter().map(|invoice| InvoiceRow::new(invoice, currency));
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(3..5), Alignment::right());

    let total: Money = invoices.iter().map(|invoice| invoice.amount_residual).sum();
    format!(
        "{}\n\n{} invoice(s), {} due\n",
        table,
        invoices.len(),
        total.format_with_symbol(currency)
    )
}

/// Format a single invoice
pub fn format_invoice_details(invoice: &Invoice, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Invoice:   {}\n", invoice.display_name()));
    output.push_str(&format!("ID:        {}\n", invoice.invoice_id.get()));
    output.push_str(&format!("Customer:  {}\n", invoice.customer()));
    if let Some(reference) = &invoice.payment_reference {
        output.push_str(&format!("Reference: {}\n", reference));
    }
    output.push_str(&format!(
        "Total:     {}\n",
        invoice.amount_total.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Due:       {}\n",
        invoice.amount_residual.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "State:     {} / {}\n",
        invoice.state, invoice.payment_state
    ));
    output
}
