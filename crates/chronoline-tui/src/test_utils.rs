//! Test utilities for chronoline-tui rendering and state tests.

use crate::app::{App, Mode};
use crate::screens;
use chronoline_engine::{TimelineEntry, TimelineStyles};
use ratatui::{buffer::Buffer, layout::Rect};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// A small dated collection used across tests.
pub fn test_entries() -> Vec<TimelineEntry> {
    vec![
        test_entry("Kickoff", "2024-01-10", false, "<p>Course kickoff</p>"),
        test_entry("Midterm review", "2024-02-20", false, "<p>Review week</p>"),
        test_entry("Launch", "2024-03-30", true, "<p>Go</p>"),
    ]
}

/// Build one entry.
pub fn test_entry(content: &str, start: &str, milestone: bool, description: &str) -> TimelineEntry {
    TimelineEntry {
        content: content.into(),
        start: start.into(),
        description: description.into(),
        milestone,
        ..Default::default()
    }
}

/// Create a viewer app over the test collection.
pub fn create_viewer_app() -> App {
    App::new(Mode::Viewer, test_entries(), TimelineStyles::default())
}

/// Create an editor app over the test collection.
pub fn create_editor_app() -> App {
    App::new(Mode::Editor, test_entries(), TimelineStyles::default())
}

/// Convert a buffer to a string representation for assertions.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }
    result
}

/// Render the app's current screen (including overlays) to a string.
pub fn render_app_to_string(app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    screens::render_app(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert!(result.contains("Hello"));
        assert!(result.contains("World"));
    }

    #[test]
    fn test_create_test_apps() {
        let viewer = create_viewer_app();
        assert_eq!(viewer.mode, Mode::Viewer);
        assert_eq!(viewer.entries.len(), 3);

        let editor = create_editor_app();
        assert_eq!(editor.mode, Mode::Editor);
        assert_eq!(editor.session.current_index(), Some(0));
    }
}
