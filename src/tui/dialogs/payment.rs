//! Register payment dialog
//!
//! Wraps a [`PaymentRegistrationDialog`] handed over by the workflow with an
//! editable amount field. Confirming or cancelling consumes the form and
//! resolves the dialog for the waiting coordinator.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::error::InvoicePayResult;
use crate::models::{DialogResult, Money, MoneyParseError};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;
use crate::workflow::PaymentRegistrationDialog;

/// State of the payment form
#[derive(Debug)]
pub struct PaymentForm {
    dialog: PaymentRegistrationDialog,
    pub amount_input: TextInput,
    /// Why the last confirm attempt was refused
    pub error: Option<String>,
}

impl PaymentForm {
    /// Start editing a dialog, the amount field prefilled from it
    pub fn new(dialog: PaymentRegistrationDialog) -> Self {
        let amount_input = TextInput::new()
            .label("Amount")
            .placeholder("0.00")
            .content(dialog.amount().to_plain_string())
            .focused(true);
        Self {
            dialog,
            amount_input,
            error: None,
        }
    }

    pub fn dialog(&self) -> &PaymentRegistrationDialog {
        &self.dialog
    }

    /// Type into the amount field; only characters of an amount are taken
    pub fn insert(&mut self, c: char) {
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.amount_input.insert(c);
            self.error = None;
        }
    }

    pub fn next_journal(&mut self) {
        self.dialog.select_next_journal();
    }

    pub fn previous_journal(&mut self) {
        self.dialog.select_previous_journal();
    }

    /// The amount currently typed
    pub fn parsed_amount(&self) -> Result<Money, MoneyParseError> {
        Money::parse(self.amount_input.value())
    }

    /// Confirm the dialog with the given amount
    pub fn confirm(mut self, amount: Money) -> InvoicePayResult<DialogResult> {
        self.dialog.set_amount(amount);
        self.dialog.confirm()
    }

    pub fn cancel(self) {
        self.dialog.cancel();
    }
}

/// Render the payment dialog
pub fn render(frame: &mut Frame, form: &PaymentForm, currency: &str) {
    let dialog = form.dialog();
    let journal_rows = dialog.journals().len().clamp(1, 6) as u16;
    let area = centered_rect_fixed(60, 12 + journal_rows, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Register Payment ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),            // Invoice
            Constraint::Length(2),            // Amount
            Constraint::Length(1),            // Journal label
            Constraint::Length(journal_rows), // Journals
            Constraint::Length(1),            // Error
            Constraint::Length(1),            // Instructions
        ])
        .split(inner);

    let invoice = dialog.invoice();
    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                invoice.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(invoice.customer().to_string(), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("Residual: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                invoice.amount_residual.format_with_symbol(currency),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ]);
    frame.render_widget(summary, chunks[0]);

    frame.render_widget(&form.amount_input, chunks[1]);

    frame.render_widget(
        Paragraph::new(Span::styled("Journal:", Style::default().fg(Color::Cyan))),
        chunks[2],
    );

    if !dialog.is_ready() {
        frame.render_widget(
            Paragraph::new("Loading journals...").style(Style::default().fg(Color::Yellow)),
            chunks[3],
        );
    } else if dialog.journals().is_empty() {
        frame.render_widget(
            Paragraph::new("No payment journal available").style(Style::default().fg(Color::Yellow)),
            chunks[3],
        );
    } else {
        let items: Vec<ListItem> = dialog
            .journals()
            .iter()
            .map(|journal| ListItem::new(journal.name.clone()))
            .collect();
        let selected = dialog
            .journal_id()
            .and_then(|id| dialog.journals().iter().position(|journal| journal.id == id));

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        let mut state = ListState::default();
        state.select(selected);
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[4],
        );
    }

    let instructions = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Pay  "),
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" Journal  "),
        Span::styled("[Esc]", Style::default().fg(Color::DarkGray)),
        Span::raw(" Cancel"),
    ]));
    frame.render_widget(instructions, chunks[5]);
}
