//! Editor screen: step tabs, settings forms, and the item list + form.

use crate::app::{App, EntryForm, FormField, ItemsFocus};
use crate::screens::Screen;
use crate::text::truncate_to_width;
use crate::ui::main_layout;
use crate::ui::theme::{Styles, Symbols};
use crate::ui::widgets::{KeyHint, StatusBar, StepTabs, TextInputState};
use chronoline_engine::EditStep;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Width reserved for field labels.
const LABEL_WIDTH: u16 = 22;

/// The editor screen.
pub struct EditorScreen;

impl Screen for EditorScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Step tabs
                Constraint::Min(6),    // Step content
            ])
            .split(main_area);

        let titles = EditStep::ALL.iter().map(|step| step.title()).collect();
        StepTabs::new(titles)
            .select(app.session.step().index())
            .render(chunks[0], buf);

        match app.session.step() {
            EditStep::Basics => render_settings(
                &app.basics,
                &["Timeline title", "Timeline description"],
                app.basics_focus,
                " Basic settings ",
                chunks[1],
                buf,
            ),
            EditStep::Styling => render_settings(
                &app.styling,
                &[
                    "Event background",
                    "Event border",
                    "Event text",
                    "Milestone background",
                    "Milestone border",
                    "Milestone text",
                ],
                app.styling_focus,
                " Styling settings ",
                chunks[1],
                buf,
            ),
            EditStep::Items => render_items(app, chunks[1], buf),
        }

        render_status_bar(app, status_area, buf);
    }
}

fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer) {
    let mut hints = Vec::new();
    if app.session.can_retreat() {
        hints.push(KeyHint::new("Shift+Tab", "Back"));
    }
    if app.session.can_advance() {
        hints.push(KeyHint::new("Tab", "Continue"));
    }
    if app.session.can_save() {
        hints.push(KeyHint::new("Ctrl+S", "Save"));
    }
    if app.session.step() == EditStep::Items && app.items_focus == ItemsFocus::List {
        hints.push(KeyHint::new("Enter", "Edit"));
        hints.push(KeyHint::new("a", "Add"));
        hints.push(KeyHint::new("d", "Delete"));
    }
    hints.push(KeyHint::new("Esc", "Cancel"));
    hints.push(KeyHint::new("?", "Help"));

    let mut bar = StatusBar::new("Edit").hints(hints);
    if app.save_in_progress {
        bar = bar.right("Saving...");
    } else if let Some(notice) = app.notice.as_deref() {
        bar = bar.right(notice);
    }
    bar.render(area, buf);
}

/// Render a column of labeled one-line inputs (basics and styling steps).
fn render_settings(
    inputs: &[TextInputState],
    labels: &[&str],
    focus: usize,
    title: &str,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());
    let inner = block.inner(area);
    block.render(area, buf);

    for (index, (input, label)) in inputs.iter().zip(labels.iter().copied()).enumerate() {
        let y = inner.y + u16::try_from(index).unwrap_or(0) * 2;
        if y >= inner.y + inner.height {
            break;
        }
        render_field(label, input, index == focus, true, inner, y, buf);
    }
}

/// One labeled input row: focus marker, label, then the input itself.
fn render_field(
    label: &str,
    input: &TextInputState,
    focused: bool,
    pane_active: bool,
    inner: Rect,
    y: u16,
    buf: &mut Buffer,
) {
    let is_active = focused && pane_active;
    let marker = if is_active { Symbols::FOCUS } else { " " };
    let label_style = if is_active {
        Styles::highlight()
    } else {
        Styles::dim()
    };
    let line = Line::from(vec![
        Span::styled(format!("{marker} "), Styles::active()),
        Span::styled(format!("{label:<width$}", width = usize::from(LABEL_WIDTH) - 2), label_style),
    ]);
    buf.set_line(inner.x, y, &line, LABEL_WIDTH.min(inner.width));

    if inner.width > LABEL_WIDTH {
        let field_area = Rect::new(inner.x + LABEL_WIDTH, y, inner.width - LABEL_WIDTH, 1);
        input.widget().focused(is_active).render(field_area, buf);
    }
}

fn render_items(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(area);

    render_item_list(app, chunks[0], buf);
    render_item_form(app, chunks[1], buf);
}

fn render_item_list(app: &App, area: Rect, buf: &mut Buffer) {
    let active = app.items_focus == ItemsFocus::List;
    let block = Block::default()
        .title(" Items ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if active {
            Styles::border_active()
        } else {
            Styles::border()
        })
        .style(Styles::default());
    let inner = block.inner(area);
    block.render(area, buf);

    let entries = app.session.entries();
    if entries.is_empty() {
        buf.set_line(
            inner.x + 1,
            inner.y,
            &Line::from(Span::styled("No items yet.", Styles::dim())),
            inner.width,
        );
        return;
    }

    let editing = app.session.current_index();
    for (index, entry) in entries.iter().enumerate() {
        let y = inner.y + u16::try_from(index).unwrap_or(0);
        if y >= inner.y + inner.height {
            break;
        }

        let is_cursor = index == app.items_cursor;
        let marker = if is_cursor && active { Symbols::FOCUS } else { " " };
        let style = if editing == Some(index) {
            Styles::highlight()
        } else if is_cursor {
            Styles::active()
        } else {
            Styles::default()
        };

        // Summary titles are truncated for display only
        let title = truncate_to_width(
            &entry.display_title(),
            usize::from(inner.width.saturating_sub(2)),
        );
        let line = Line::from(vec![
            Span::styled(format!("{marker} "), Styles::active()),
            Span::styled(title, style),
        ]);
        buf.set_line(inner.x, y, &line, inner.width);
    }
}

fn render_item_form(app: &App, area: Rect, buf: &mut Buffer) {
    let active = app.items_focus == ItemsFocus::Form;
    let title = match app.session.current_index() {
        Some(index) => format!(" Item ({}) ", index + 1),
        None => " Item ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(if active {
            Styles::border_active()
        } else {
            Styles::border()
        })
        .style(Styles::default());
    let inner = block.inner(area);
    block.render(area, buf);

    // Hidden form while no entry is selected
    let Some(form) = app.form.as_ref() else {
        buf.set_line(
            inner.x + 1,
            inner.y,
            &Line::from(Span::styled(
                "No item selected. Press Enter on an item, or a to add one.",
                Styles::dim(),
            )),
            inner.width,
        );
        return;
    };

    if inner.height < 6 {
        return;
    }

    render_field(
        "Title",
        &form.title,
        form.focus == FormField::Title,
        active,
        inner,
        inner.y,
        buf,
    );
    render_field(
        "Date (YYYY-MM-DD)",
        &form.date,
        form.focus == FormField::Date,
        active,
        inner,
        inner.y + 1,
        buf,
    );
    render_milestone_row(form, active, inner, inner.y + 2, buf);

    // Description takes the remaining rows
    let desc_focused = active && form.focus == FormField::Description;
    let marker = if desc_focused { Symbols::FOCUS } else { " " };
    let label_style = if desc_focused {
        Styles::highlight()
    } else {
        Styles::dim()
    };
    buf.set_line(
        inner.x,
        inner.y + 3,
        &Line::from(vec![
            Span::styled(format!("{marker} "), Styles::active()),
            Span::styled("Description", label_style),
        ]),
        inner.width,
    );

    let body_height = inner.height.saturating_sub(5);
    if body_height > 0 {
        let body_area = Rect::new(
            inner.x + 2,
            inner.y + 4,
            inner.width.saturating_sub(2),
            body_height,
        );
        form.description.widget().focused(desc_focused).render(body_area, buf);
    }

    // Inline validation message near the form
    if let Some(validation) = app.session.validation() {
        buf.set_line(
            inner.x,
            inner.y + inner.height - 1,
            &Line::from(Span::styled(validation.to_string(), Styles::error())),
            inner.width,
        );
    }
}

fn render_milestone_row(form: &EntryForm, pane_active: bool, inner: Rect, y: u16, buf: &mut Buffer) {
    let focused = pane_active && form.focus == FormField::Milestone;
    let marker = if focused { Symbols::FOCUS } else { " " };
    let label_style = if focused {
        Styles::highlight()
    } else {
        Styles::dim()
    };
    let check = if form.milestone { "[x]" } else { "[ ]" };

    let line = Line::from(vec![
        Span::styled(format!("{marker} "), Styles::active()),
        Span::styled(
            format!("{:<width$}", "Milestone", width = usize::from(LABEL_WIDTH) - 2),
            label_style,
        ),
        Span::styled(check, if form.milestone { Styles::milestone() } else { Styles::default() }),
    ]);
    buf.set_line(inner.x, y, &line, inner.width);
}
