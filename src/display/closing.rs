//! Session closing summary formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{ClosingInvoiceSummary, SessionId};

#[derive(Tabled)]
struct PaidLineRow {
    #[tabled(rename = "Invoice")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the invoice payments made during a session
pub fn format_closing_summary(
    session_id: SessionId,
    summary: &ClosingInvoiceSummary,
    currency: &str,
) -> String {
    let mut output = format!("Invoice payments for session {}\n", session_id.get());

    if summary.is_empty() {
        output.push_str("No invoices were paid during this session.\n");
        return output;
    }

    let rows = summary.invoice_paid_lines.iter().map(|line| PaidLineRow {
        name: line
            .name
            .clone()
            .unwrap_or_else(|| format!("Invoice #{}", line.id)),
        amount: line.amount.format_with_symbol(currency),
    });
    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(1), Alignment::right());

    output.push_str(&format!(
        "{}\n\nTotal: {}\n",
        table,
        summary.invoice_paid_total.format_with_symbol(currency)
    ));
    output
}
