//! Invoice list screen
//!
//! Shows the outstanding invoices exactly as last fetched.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{Invoice, InvoiceState, Money};
use crate::tui::app::App;

/// Render the invoice list
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let currency = app.settings.currency_symbol.as_str();
    let invoices = app.invoices();
    let due: Money = invoices.iter().map(|invoice| invoice.amount_residual).sum();

    let block = Block::default()
        .title(format!(" Invoices ({}) ", invoices.len()))
        .title_bottom(
            Line::from(format!(" {} due ", due.format_with_symbol(currency))).alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if invoices.is_empty() {
        let message = if app.snapshot.busy {
            "Loading invoices..."
        } else {
            "No outstanding invoices"
        };
        let text = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let header = Row::new(vec![
        "Number", "Reference", "Customer", "Total", "Residual", "State", "Payment",
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = invoices.iter().map(|invoice| invoice_row(invoice, currency)).collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn invoice_row<'a>(invoice: &'a Invoice, currency: &str) -> Row<'a> {
    let state = if invoice.is_draft() {
        Cell::from("Draft (post first)").style(Style::default().fg(Color::Yellow))
    } else if invoice.state == InvoiceState::Cancel {
        Cell::from(invoice.state.to_string()).style(Style::default().fg(Color::Red))
    } else {
        Cell::from(invoice.state.to_string())
    };

    let residual_style = if invoice.is_paid() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    Row::new(vec![
        Cell::from(invoice.display_name()),
        Cell::from(invoice.payment_reference.as_deref().unwrap_or("")),
        Cell::from(invoice.customer()),
        Cell::from(right(invoice.amount_total.format_with_symbol(currency))),
        Cell::from(right(invoice.amount_residual.format_with_symbol(currency)))
            .style(residual_style),
        state,
        Cell::from(invoice.payment_state.to_string()),
    ])
}

fn right(text: String) -> Line<'static> {
    Line::from(text).alignment(Alignment::Right)
}
