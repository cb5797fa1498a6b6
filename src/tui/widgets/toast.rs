//! Toasts
//!
//! One-line messages shown in the top-right corner after a workflow command
//! reports something. They are shown one at a time; a toast's clock starts
//! when it reaches the front of the queue.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Nothing happened worth a green check, e.g. an ignored key
    Info,
    /// A command went through
    Success,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    lifetime: Duration,
}

impl Toast {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ToastKind::Info,
            lifetime: TOAST_LIFETIME,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            ..Self::info(text)
        }
    }

    pub fn lasting(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

/// Pending toasts; the front one is on screen
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<Toast>,
    front_since: Option<Instant>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        if self.pending.is_empty() {
            self.front_since = Some(Instant::now());
        }
        self.pending.push_back(toast);
    }

    /// Retire the front toast if its time is up at `now`
    pub fn expire(&mut self, now: Instant) {
        let Some(front) = self.pending.front() else {
            return;
        };
        let since = self.front_since.unwrap_or(now);
        if now.saturating_duration_since(since) >= front.lifetime {
            self.pending.pop_front();
            self.front_since = (!self.pending.is_empty()).then_some(now);
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Renders one toast over whatever is underneath
pub struct ToastWidget<'a>(pub &'a Toast);

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (accent, label) = match self.0.kind {
            ToastKind::Info => (Color::Cyan, " i "),
            ToastKind::Success => (Color::Green, " ok "),
        };

        Clear.render(area, buf);
        Paragraph::new(Line::from(self.0.text.as_str()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(accent))
                    .title(label)
                    .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD)),
            )
            .render(area, buf);
    }
}
