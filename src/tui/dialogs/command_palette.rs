//! Command palette: type to filter, Enter to run

use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::commands::{filter_commands, Command};
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 13, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Run command ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [prompt_area, rule_area, results_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);
    let [marker_area, input_area] =
        Layout::horizontal([Constraint::Length(2), Constraint::Min(0)]).areas(prompt_area);

    frame.render_widget(Span::styled(": ", Style::default().fg(Color::Magenta)), marker_area);
    frame.render_widget(&app.command_input, input_area);
    frame.render_widget(
        Span::styled(
            "─".repeat(rule_area.width as usize),
            Style::default().fg(Color::DarkGray),
        ),
        rule_area,
    );

    let matches = filter_commands(app.command_input.value());
    if matches.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing matches").style(Style::default().fg(Color::DarkGray)),
            results_area,
        );
        return;
    }

    // Keep the selection in view when the list is taller than the dialog
    let selected = app.selected_command_index.min(matches.len() - 1);
    let visible = (results_area.height as usize).max(1);
    let first = selected.saturating_sub(visible - 1);

    let lines: Vec<Line> = matches
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(index, command)| command_line(command, index == selected))
        .collect();
    frame.render_widget(Paragraph::new(lines), results_area);
}

fn command_line(command: &Command, selected: bool) -> Line<'static> {
    let base = if selected {
        Style::default().bg(Color::Magenta).fg(Color::Black)
    } else {
        Style::default()
    };
    let key = command
        .shortcut
        .map(|key| format!(" ({})", key))
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(format!(" {:<9}", command.name), base.add_modifier(Modifier::BOLD)),
        Span::styled(command.description, base),
        Span::styled(key, base.fg(if selected { Color::Black } else { Color::DarkGray })),
    ])
}
