//! Home screen
//!
//! The point-of-sale landing screen carrying the Invoices button.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::workflow::InvoicesButton;

/// Render the home screen
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Point of Sale ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let button_style = if app.snapshot.busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("  {}  ", InvoicesButton::LABEL),
            button_style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press i or Enter to list unpaid invoices",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let content = centered_rect_fixed(44, 3, inner);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content,
    );
}
