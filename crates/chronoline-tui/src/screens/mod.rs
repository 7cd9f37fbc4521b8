//! Screen definitions for the chronoline TUI.

pub mod editor;
pub mod viewer;

use crate::app::{App, Mode, Overlay};
use crate::ui::theme::Styles;
use crate::ui::{centered_fixed, main_layout};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub use editor::EditorScreen;
pub use viewer::ViewerScreen;

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the active modal overlay, if any.
pub fn render_overlay(app: &App, area: Rect, buf: &mut Buffer) {
    match &app.overlay {
        Overlay::None => {}
        Overlay::Help => render_help_overlay(app.mode, area, buf),
        Overlay::ConfirmCancel => render_modal(
            " Close editor ",
            "Discard staged changes and close the editor?\n\n[Enter] Close   [Esc] Keep editing",
            Styles::border_active(),
            area,
            buf,
        ),
        Overlay::SaveError(message) => render_modal(
            " Save failed ",
            &format!("Failed to save.\n\n{message}\n\n[Enter] Dismiss"),
            Styles::error(),
            area,
            buf,
        ),
    }
}

/// Render the help overlay for the given mode.
pub fn render_help_overlay(mode: Mode, area: Rect, buf: &mut Buffer) {
    let help_text = match mode {
        Mode::Viewer => {
            r"
  Timeline
    Tab / Shift+Tab   Focus next/previous entry
    Enter / Space     Select focused entry
    Left / Right      Pan window by one day
    Shift+Left/Right  Pan window by one week
    + / -             Zoom in/out
    =                 Fit all entries
    q                 Quit
    ?                 Toggle this help

  [Press any key to close]
"
        }
        Mode::Editor => {
            r"
  Editor
    Tab / Shift+Tab   Continue / back one step
    Up / Down         Previous/next field
    Enter             Edit highlighted item
    a                 Add a new item
    d                 Delete highlighted item
    Space             Toggle the milestone flag
    Ctrl+S            Save (final step only)
    Esc               Leave the form / cancel
    ?                 Toggle this help

  [Press any key to close]
"
        }
    };

    let width = 54.min(area.width.saturating_sub(4));
    let height = 16.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    Paragraph::new(help_text)
        .block(block)
        .style(Styles::default())
        .render(overlay_area, buf);
}

fn render_modal(title: &str, body: &str, border: ratatui::style::Style, area: Rect, buf: &mut Buffer) {
    let width = 50.min(area.width.saturating_sub(4));
    let height = 9.min(area.height.saturating_sub(4));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(border)
        .style(Styles::default());

    Paragraph::new(body)
        .block(block)
        .style(Styles::default())
        .wrap(Wrap { trim: false })
        .render(overlay_area, buf);
}

/// Render the screen for the app's mode, plus any overlay.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    match app.mode {
        Mode::Viewer => ViewerScreen.render(app, area, buf),
        Mode::Editor => EditorScreen.render(app, area, buf),
    }
    let (main_area, _) = main_layout(area);
    render_overlay(app, main_area, buf);
}
