//! Error dialog widget
//!
//! Displays a failed command with recovery suggestions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::{InvoicePayError, RemoteFailure};

/// What the error dialog shows
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub title: String,
    pub details: String,
    pub suggestions: Vec<String>,
}

impl ErrorInfo {
    /// Describe an error for the user
    pub fn from_error(error: &InvoicePayError) -> Self {
        let (title, suggestions) = match error {
            InvoicePayError::RemoteCallFailed { procedure, cause } => {
                let suggestions = match cause {
                    RemoteFailure::Transport(_) | RemoteFailure::Timeout(_) => vec![
                        "Check that the server is reachable".to_string(),
                        "Press R to try again".to_string(),
                    ],
                    RemoteFailure::Http(_) => vec![
                        "The server may be restarting; press R to try again".to_string(),
                        "Check the server URL with 'invoice-pay config'".to_string(),
                    ],
                    RemoteFailure::Server { .. } => vec![
                        "The server refused the operation; review the invoice".to_string(),
                    ],
                    RemoteFailure::Decode(_) => vec![
                        "The server's reply was not understood".to_string(),
                        "Check that the POS invoicing module is installed".to_string(),
                    ],
                };
                (format!("'{}' failed", procedure), suggestions)
            }
            InvoicePayError::Authentication(_) => (
                "Login Failed".to_string(),
                vec!["Check the database, login and password".to_string()],
            ),
            InvoicePayError::Validation(_) => (
                "Invalid Input".to_string(),
                vec!["Review the input values and try again".to_string()],
            ),
            InvoicePayError::NotFound { entity_type, .. } => (
                format!("{} Not Found", entity_type),
                vec!["Press R to reload the invoice list".to_string()],
            ),
            InvoicePayError::DialogState(_) => (
                "Payment Dialog".to_string(),
                vec!["Wait for the journals to load".to_string()],
            ),
            InvoicePayError::Config(_) => (
                "Configuration Error".to_string(),
                vec!["Run 'invoice-pay config' to review the settings".to_string()],
            ),
            InvoicePayError::Io(_) | InvoicePayError::Json(_) | InvoicePayError::Export(_) => {
                ("I/O Error".to_string(), Vec::new())
            }
            InvoicePayError::Tui(_) => (
                "Interface Error".to_string(),
                vec!["Restart invoice-pay or use the CLI commands".to_string()],
            ),
        };

        Self {
            title,
            details: error.to_string(),
            suggestions,
        }
    }
}

/// Widget for rendering an error dialog
pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self { error }
    }
}

impl Widget for ErrorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Error: {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Details
                Constraint::Min(1),    // Suggestions
                Constraint::Length(1), // Close hint
            ])
            .split(inner);

        Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        if !self.error.suggestions.is_empty() {
            let mut lines = vec![Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];
            lines.extend(
                self.error
                    .suggestions
                    .iter()
                    .map(|suggestion| Line::from(format!("  - {}", suggestion))),
            );

            Paragraph::new(lines)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }

        Paragraph::new("Press Esc or Enter to close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Calculate the area for an error dialog (centered in parent)
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(10, 16).min(parent.height);

    let x = parent.x + (parent.width - width) / 2;
    let y = parent.y + (parent.height - height) / 2;

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_remote_failure_names_procedure() {
        let error = InvoicePayError::remote("post_invoice", RemoteFailure::Http(502));
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "'post_invoice' failed");
        assert!(info.details.contains("HTTP status 502"));
        assert!(!info.suggestions.is_empty());
    }

    #[test]
    fn test_timeout_suggests_retry() {
        let error = InvoicePayError::remote(
            "get_invoices",
            RemoteFailure::Timeout(Duration::from_secs(30)),
        );
        let info = ErrorInfo::from_error(&error);
        assert!(info.suggestions.iter().any(|s| s.contains("try again")));
    }

    #[test]
    fn test_validation_error() {
        let error = InvoicePayError::Validation("Invalid money format: abc".into());
        let info = ErrorInfo::from_error(&error);

        assert_eq!(info.title, "Invalid Input");
        assert!(info.details.contains("abc"));
    }

    #[test]
    fn test_not_found_error() {
        let info = ErrorInfo::from_error(&InvoicePayError::invoice_not_found("7"));
        assert_eq!(info.title, "Invoice Not Found");
    }

    #[test]
    fn test_error_dialog_area_fits_small_terminal() {
        let area = error_dialog_area(Rect::new(0, 0, 30, 8));
        assert_eq!(area, Rect::new(0, 0, 30, 8));
    }
}
