//! Status bar view
//!
//! Shows the POS session, configuration, server and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

const HINTS: &str = " q:Quit  ?:Help  ::Command ";

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = context_spans(app);

    let left_len: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(left_len + HINTS.len())
        .max(1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(HINTS, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn context_spans(app: &App) -> Vec<Span<'static>> {
    let pos = &app.settings.pos;
    let label = |id: Option<String>| id.unwrap_or_else(|| "-".to_string());

    vec![
        Span::styled(" Session: ", Style::default().fg(Color::White)),
        Span::styled(
            label(pos.session_id.map(|id| id.to_string())),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" │ "),
        Span::styled("Config: ", Style::default().fg(Color::White)),
        Span::styled(
            label(pos.config_id.map(|id| id.to_string())),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" │ "),
        Span::styled(app.settings.server.url.clone(), Style::default().fg(Color::DarkGray)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionId;
    use crate::tui::app::tests::{app, remote};

    #[tokio::test]
    async fn test_context_shows_session_and_server() {
        let mut app = app(remote());
        app.settings.pos.session_id = Some(SessionId::new(12));
        app.settings.server.url = "https://erp.example.com".into();

        let text: String = context_spans(&app)
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(text, " Session: ses-12 │ Config: - │ https://erp.example.com");
    }
}
