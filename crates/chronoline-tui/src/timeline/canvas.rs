//! Date-axis canvas: lays the entries out inside the visible window.
//!
//! This is the rendering boundary of the widget. It is driven entirely by
//! the viewer's window state and reports nothing back; entries without a
//! parseable date, or outside the window, are simply not drawn.

use crate::text::truncate_to_width;
use crate::ui::theme::{Styles, Symbols};
use chrono::NaiveDate;
use chronoline_engine::{EntryClass, TimelineEntry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Widget drawing one window of the timeline.
#[derive(Debug, Clone)]
pub struct Canvas<'a> {
    entries: &'a [TimelineEntry],
    window: (NaiveDate, NaiveDate),
    focused: usize,
    selected: Option<usize>,
    block: Option<Block<'a>>,
}

impl<'a> Canvas<'a> {
    /// Create a canvas over the collection for the given window.
    pub fn new(entries: &'a [TimelineEntry], window: (NaiveDate, NaiveDate)) -> Self {
        Self {
            entries,
            window,
            focused: 0,
            selected: None,
            block: None,
        }
    }

    /// Mark the keyboard-focused entry.
    #[must_use]
    pub fn focused(mut self, focused: usize) -> Self {
        self.focused = focused;
        self
    }

    /// Mark the selected entry.
    #[must_use]
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    /// Set the block to wrap the canvas.
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Column for a date inside the window, if it is in range.
    fn column(&self, date: NaiveDate, width: u16) -> Option<u16> {
        let (start, end) = self.window;
        if date < start || date > end || width == 0 {
            return None;
        }
        let range = (end - start).num_days().max(1);
        let rel = (date - start).num_days();
        let span = i64::from(width.saturating_sub(1));
        u16::try_from(rel * span / range).ok()
    }
}

impl Widget for Canvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(b) => {
                let inner = b.inner(area);
                b.clone().render(area, buf);
                inner
            }
            None => area,
        };

        if inner.height < 4 || inner.width < 12 {
            return;
        }

        if self.entries.is_empty() {
            buf.set_line(
                inner.x + 1,
                inner.y + 1,
                &Line::from(Span::styled("No timeline data.", Styles::dim())),
                inner.width,
            );
            return;
        }

        let (start, end) = self.window;

        // Window bounds label line
        let left = start.format("%Y-%m-%d").to_string();
        let right = end.format("%Y-%m-%d").to_string();
        buf.set_line(
            inner.x,
            inner.y,
            &Line::from(Span::styled(left, Styles::dim())),
            inner.width,
        );
        let right_w = u16::try_from(right.len()).unwrap_or(0);
        if right_w < inner.width {
            buf.set_line(
                inner.x + inner.width - right_w,
                inner.y,
                &Line::from(Span::styled(right, Styles::dim())),
                right_w,
            );
        }

        // Axis
        let axis_y = inner.y + 2;
        let axis = "\u{2500}".repeat(usize::from(inner.width));
        buf.set_line(
            inner.x,
            axis_y,
            &Line::from(Span::styled(axis, Styles::border())),
            inner.width,
        );

        // Markers and labels, alternating above/below the axis
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(date) = entry.start_date() else {
                continue;
            };
            let Some(col) = self.column(date, inner.width) else {
                continue;
            };

            let x = inner.x + col;
            let marker_style = match entry.class() {
                EntryClass::Milestone => Styles::milestone(),
                EntryClass::Event => Styles::event(),
            };
            let glyph = match entry.class() {
                EntryClass::Milestone => Symbols::MILESTONE,
                EntryClass::Event => Symbols::EVENT,
            };
            buf.set_line(
                x,
                axis_y,
                &Line::from(Span::styled(glyph, marker_style)),
                1,
            );

            let label_y = if index % 2 == 0 { axis_y - 1 } else { axis_y + 1 };
            if label_y >= inner.y + inner.height {
                continue;
            }

            let is_focused = index == self.focused;
            let is_selected = self.selected == Some(index);
            let style = if is_selected {
                Styles::highlight()
            } else if is_focused {
                Styles::active()
            } else {
                Styles::default()
            };

            let budget = usize::from(inner.width.saturating_sub(col));
            let mut label = truncate_to_width(&entry.display_title(), budget.max(4));
            if is_focused {
                label = format!("{}{label}", Symbols::FOCUS);
            }
            buf.set_line(x, label_y, &Line::from(Span::styled(label, style)), inner.width - col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn entry(content: &str, start: &str, milestone: bool) -> TimelineEntry {
        TimelineEntry {
            content: content.into(),
            start: start.into(),
            milestone,
            ..Default::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render(canvas: Canvas<'_>) -> String {
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);
        canvas.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_empty_collection_shows_inert_state() {
        let out = render(Canvas::new(&[], (date(2024, 1, 1), date(2024, 2, 1))));
        assert!(out.contains("No timeline data."));
    }

    #[test]
    fn test_entries_inside_window_are_drawn() {
        let entries = vec![
            entry("Kickoff", "2024-01-05", false),
            entry("Launch", "2024-01-20", true),
        ];
        let out = render(Canvas::new(&entries, (date(2024, 1, 1), date(2024, 2, 1))));
        assert!(out.contains("Kickoff"));
        assert!(out.contains("Launch"));
        assert!(out.contains(Symbols::EVENT));
        assert!(out.contains(Symbols::MILESTONE));
        assert!(out.contains("2024-01-01"));
        assert!(out.contains("2024-02-01"));
    }

    #[test]
    fn test_entries_outside_window_are_skipped() {
        let entries = vec![
            entry("Visible", "2024-01-10", false),
            entry("Off-screen", "2024-06-01", false),
            entry("Undated", "", false),
        ];
        let out = render(Canvas::new(&entries, (date(2024, 1, 1), date(2024, 2, 1))));
        assert!(out.contains("Visible"));
        assert!(!out.contains("Off-screen"));
    }
}
