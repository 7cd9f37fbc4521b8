//! Viewer screen: the timeline canvas, detail panel, and overflow status.

use crate::app::App;
use crate::screens::Screen;
use crate::timeline::Canvas;
use crate::ui::main_layout;
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// The viewer screen.
pub struct ViewerScreen;

impl Screen for ViewerScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // Canvas
                Constraint::Length(9), // Detail panel
            ])
            .split(main_area);

        render_canvas(app, chunks[0], buf);
        render_detail(app, chunks[1], buf);

        let hints = vec![
            KeyHint::new("Tab", "Focus"),
            KeyHint::new("Enter", "Select"),
            KeyHint::new("\u{2190}/\u{2192}", "Pan"),
            KeyHint::new("+/-", "Zoom"),
            KeyHint::new("=", "Fit"),
            KeyHint::new("?", "Help"),
        ];

        // The transient notice wins over the overflow status
        let overflow = overflow_status(app);
        let right = app
            .notice
            .as_deref()
            .or(overflow.as_deref())
            .unwrap_or("");
        StatusBar::new("Timeline")
            .hints(hints)
            .right(right)
            .render(status_area, buf);
    }
}

/// Status text enumerating which side(s) have off-screen entries.
fn overflow_status(app: &App) -> Option<String> {
    let overflow = app.viewer.overflow();
    overflow.message().map(|message| {
        let mut text = String::new();
        if overflow.start {
            text.push_str(Symbols::OVERFLOW_START);
            text.push(' ');
        }
        text.push_str(message);
        if overflow.end {
            text.push(' ');
            text.push_str(Symbols::OVERFLOW_END);
        }
        text
    })
}

fn render_canvas(app: &App, area: Rect, buf: &mut Buffer) {
    let styles = app.session.styles();
    let title = if styles.title.is_empty() {
        " Timeline ".to_string()
    } else {
        format!(" {} ", styles.title)
    };

    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border())
        .style(Styles::default());

    Canvas::new(&app.entries, app.viewer.window())
        .focused(app.viewer.focused())
        .selected(app.viewer.selected())
        .block(block)
        .render(area, buf);
}

fn render_detail(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(" Details ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if app.viewer.selected().is_some() {
            Styles::border_active()
        } else {
            Styles::border()
        })
        .style(Styles::default());

    let inner = block.inner(area);
    block.render(area, buf);
    if inner.height < 1 {
        return;
    }

    let Some(entry) = app.viewer.selected().and_then(|i| app.entries.get(i)) else {
        let hint = if app.entries.is_empty() {
            "No timeline data."
        } else {
            "Select an entry to see its details."
        };
        buf.set_line(
            inner.x + 1,
            inner.y,
            &Line::from(Span::styled(hint, Styles::dim())),
            inner.width,
        );
        return;
    };

    let mut lines = Vec::new();

    let marker = if entry.milestone {
        Span::styled(format!("{} ", Symbols::MILESTONE), Styles::milestone())
    } else {
        Span::styled(format!("{} ", Symbols::EVENT), Styles::event())
    };
    lines.push(Line::from(vec![
        marker,
        Span::styled(entry.content.clone(), Styles::highlight()),
    ]));
    lines.push(Line::from(Span::styled(entry.start.clone(), Styles::dim())));

    // The body is trusted rich text from the host, shown as-is
    let width = usize::from(inner.width.saturating_sub(2)).max(8);
    for wrapped in textwrap::wrap(&entry.description, width) {
        lines.push(Line::from(Span::styled(
            wrapped.into_owned(),
            Styles::default(),
        )));
    }

    lines.truncate(usize::from(inner.height));
    Paragraph::new(lines)
        .style(Styles::default())
        .render(inner, buf);
}
