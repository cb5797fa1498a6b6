//! TUI Views module
//!
//! The home screen, the invoice list and the status bar.

pub mod home;
pub mod invoice_list;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::{toast_area, AppLayout};
use super::widgets::{error_dialog_area, ErrorDialog, ToastWidget};
use crate::workflow::Screen;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);
    match app.screen() {
        Screen::Home => home::render(frame, app, layout.main),
        Screen::Invoicing => invoice_list::render(frame, app, layout.main),
    }
    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::CommandPalette => dialogs::command_palette::render(frame, app),
        ActiveDialog::RegisterPayment => {
            if let Some(form) = &app.payment {
                dialogs::payment::render(frame, form, &app.settings.currency_symbol);
            }
        }
        ActiveDialog::None => {}
    }

    if let Some(toast) = app.toasts.current() {
        frame.render_widget(ToastWidget(toast), toast_area(frame.area()));
    }

    if let Some(error) = &app.error {
        frame.render_widget(ErrorDialog::new(error), error_dialog_area(frame.area()));
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " invoice-pay ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.screen().to_string(), Style::default().fg(Color::Cyan)),
    ];
    if app.snapshot.busy {
        spans.push(Span::styled("  working...", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
