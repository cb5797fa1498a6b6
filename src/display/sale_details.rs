//! Sale details report formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::SaleDetailsInvoices;

#[derive(Tabled)]
struct SessionLineRow {
    #[tabled(rename = "Invoice")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the invoice payments of a sale details report, session by session
pub fn format_sale_details(report: &SaleDetailsInvoices, currency: &str) -> String {
    let mut output = String::from("Invoices paid\n");

    if report.is_empty() {
        output.push_str("No invoices were paid in the selected sessions.\n");
        return output;
    }

    for session in &report.invoice_paid_data {
        let rows = session.lines.iter().map(|line| SessionLineRow {
            name: line.name.clone().unwrap_or_default(),
            amount: line.amount.format_with_symbol(currency),
        });
        let mut table = Table::new(rows);
        table
            .with(Style::psql())
            .modify(Columns::single(1), Alignment::right());

        output.push_str(&format!(
            "\n{}\n{}\nSubtotal: {}\n",
            session.session_name,
            table,
            session.total.format_with_symbol(currency)
        ));
    }

    output.push_str(&format!(
        "\nTotal: {}\n",
        report.invoice_paid_total.format_with_symbol(currency)
    ));
    output
}
