//! Status bar widget.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar displayed at the bottom of the screen: mode label, key
/// hints, and right-aligned status text.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    mode: &'a str,
    hints: Vec<KeyHint>,
    right_text: Option<&'a str>,
    right_is_error: bool,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(mode: &'a str) -> Self {
        Self {
            mode,
            hints: Vec::new(),
            right_text: None,
            right_is_error: false,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn right(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self
    }

    /// Render the right-aligned text in the error style.
    #[must_use]
    pub fn right_error(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self.right_is_error = true;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        // Paint the bar background
        buf.set_style(area, Styles::status_bar());

        let mut spans = vec![
            Span::styled(format!(" {} ", self.mode), Styles::key_hint()),
            Span::styled(" ", Styles::key_label()),
        ];
        for hint in &self.hints {
            spans.push(Span::styled(format!(" {} ", hint.key), Styles::key_hint()));
            spans.push(Span::styled(
                format!(" {}  ", hint.label),
                Styles::key_label(),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        if let Some(right) = self.right_text {
            let style = if self.right_is_error {
                Styles::error()
            } else {
                Styles::key_label()
            };
            let width = u16::try_from(right.len()).unwrap_or(area.width);
            if width < area.width {
                let x = area.x + area.width - width - 1;
                buf.set_line(x, area.y, &Line::from(Span::styled(right, style)), width + 1);
            }
        }
    }
}
