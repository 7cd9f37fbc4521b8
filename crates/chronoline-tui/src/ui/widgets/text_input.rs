//! Text input widget for form fields.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// A text input widget rendering a [`TextInputState`].
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: String,
    /// Cursor position (byte index).
    cursor: usize,
    /// Optional block for borders/title.
    block: Option<Block<'a>>,
    /// Whether the input is focused.
    focused: bool,
    /// Placeholder text shown while empty.
    placeholder: Option<&'a str>,
}

impl<'a> TextInput<'a> {
    /// Set the block for the text input.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height < 1 || inner.width < 1 {
            return;
        }

        if self.content.is_empty() {
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled("_", Styles::active()));
            }
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(placeholder, Styles::dim()));
            }
            Paragraph::new(Line::from(spans)).render(inner, buf);
            return;
        }

        // Render line by line, marking the cursor position when focused
        let mut lines = Vec::new();
        let mut consumed = 0usize;
        let mut cursor_drawn = !self.focused;

        for raw in self.content.split('\n') {
            let line_start = consumed;
            let line_end = consumed + raw.len();

            if !cursor_drawn && self.cursor >= line_start && self.cursor <= line_end {
                let split = self.cursor - line_start;
                let (before, after) = raw.split_at(split);
                let marker = if after.is_empty() { "_" } else { "|" };
                lines.push(Line::from(vec![
                    Span::styled(before.to_string(), Styles::default()),
                    Span::styled(marker, Styles::active()),
                    Span::styled(after.to_string(), Styles::default()),
                ]));
                cursor_drawn = true;
            } else {
                lines.push(Line::from(Span::styled(
                    raw.to_string(),
                    Styles::default(),
                )));
            }
            consumed = line_end + 1; // account for the '\n'
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// State for a text input, managing content and cursor position.
///
/// The cursor is a byte index kept on a `char` boundary.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    /// The text content.
    pub content: String,
    /// Cursor position (byte index).
    pub cursor: usize,
}

impl TextInputState {
    /// Create a new empty text input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state holding `content`, cursor at the end.
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        self.content.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.content.remove(prev);
            self.cursor = prev;
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    /// Move cursor left one character.
    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Move cursor right one character.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.content[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Create a widget from this state.
    pub fn widget(&self) -> TextInput<'_> {
        TextInput {
            content: self.content.clone(),
            cursor: self.cursor,
            block: None,
            focused: false,
            placeholder: None,
        }
    }

    /// Byte index of the previous char boundary, if not at the start.
    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut state = TextInputState::new();
        assert!(state.is_empty());

        state.insert('H');
        state.insert('i');
        assert_eq!(state.content(), "Hi");

        state.backspace();
        assert_eq!(state.content(), "H");

        state.clear();
        assert!(state.is_empty());
    }

    #[test]
    fn test_cursor_movement_and_mid_insert() {
        let mut state = TextInputState::with_content("Hello");

        state.move_left();
        state.move_left();
        state.insert('X');
        assert_eq!(state.content(), "HelXlo");

        state.move_home();
        assert_eq!(state.cursor, 0);
        state.move_end();
        assert_eq!(state.cursor, state.content().len());
    }

    #[test]
    fn test_multibyte_safety() {
        let mut state = TextInputState::with_content("caf\u{e9}");
        state.backspace();
        assert_eq!(state.content(), "caf");

        state.insert('\u{e9}');
        state.move_left();
        state.move_left();
        state.insert('X');
        assert_eq!(state.content(), "caXf\u{e9}");
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut state = TextInputState::with_content("abc");
        state.move_home();
        state.delete();
        assert_eq!(state.content(), "bc");

        state.move_end();
        state.delete();
        assert_eq!(state.content(), "bc");
    }
}
