//! Application state and update logic for the chronoline TUI.
//!
//! Each embedded widget instance owns one [`App`]; there is no state shared
//! between instances.

use crate::event::Action;
use crate::richtext::DescriptionEditor;
use crate::ui::widgets::TextInputState;
use chronoline_engine::{
    EditStep, EditorSession, FormFields, ShiftDirection, TimelineEntry, TimelineStyles,
    ViewerState, ZoomDirection,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ticks a transient notice stays visible (tick rate is 4 Hz).
const NOTICE_TICKS: usize = 12;

/// Which widget surface this instance presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewer,
    Editor,
}

/// Modal overlay on top of the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    /// Confirm closing the editor without saving.
    ConfirmCancel,
    /// Blocking save-failure indication.
    SaveError(String),
}

/// Focus inside the item-editor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsFocus {
    List,
    Form,
}

/// The entry form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Date,
    Milestone,
    Description,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Date,
            Self::Date => Self::Milestone,
            Self::Milestone | Self::Description => Self::Description,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Description => Self::Milestone,
            Self::Milestone => Self::Date,
            Self::Date | Self::Title => Self::Title,
        }
    }
}

/// Form bound to the entry currently open for editing.
#[derive(Debug)]
pub struct EntryForm {
    pub title: TextInputState,
    pub date: TextInputState,
    pub milestone: bool,
    pub description: DescriptionEditor,
    pub focus: FormField,
}

impl EntryForm {
    fn for_entry(index: usize, entry: &TimelineEntry) -> Self {
        Self {
            title: TextInputState::with_content(&entry.content),
            date: TextInputState::with_content(&entry.start),
            milestone: entry.milestone,
            description: DescriptionEditor::open(index, &entry.description),
            focus: FormField::Title,
        }
    }

    /// Snapshot of the bound values.
    pub fn fields(&self) -> FormFields {
        FormFields {
            content: self.title.content().to_string(),
            start: self.date.content().to_string(),
            description: self.description.content().to_string(),
            milestone: self.milestone,
        }
    }
}

/// Application state for one widget instance.
#[derive(Debug)]
pub struct App {
    /// Which surface this instance presents.
    pub mode: Mode,

    /// Whether the app should quit.
    pub should_quit: bool,

    /// Active modal overlay.
    pub overlay: Overlay,

    /// The fetched collection, as displayed by the viewer.
    pub entries: Vec<TimelineEntry>,

    /// Viewer selection and window state.
    pub viewer: ViewerState,

    /// Editor working state.
    pub session: EditorSession,

    /// Cursor row in the item list.
    pub items_cursor: usize,

    /// Focused pane on the item-editor step.
    pub items_focus: ItemsFocus,

    /// Form for the entry open in the editor, when one is open.
    pub form: Option<EntryForm>,

    /// Inputs for the basic-settings step (timeline title, description).
    pub basics: [TextInputState; 2],

    /// Focused basic-settings field.
    pub basics_focus: usize,

    /// Inputs for the styling step (the six colors).
    pub styling: [TextInputState; 6],

    /// Focused styling field.
    pub styling_focus: usize,

    /// A save was requested and not yet started.
    pub save_requested: bool,

    /// A save request is in flight.
    pub save_in_progress: bool,

    /// The editor was cancelled; the host should be notified.
    pub cancel_requested: bool,

    /// Transient status notice.
    pub notice: Option<String>,

    /// Ticks remaining until the notice is cleared.
    notice_ttl: usize,

    /// Tick counter.
    pub tick: usize,
}

impl App {
    /// Create the per-instance state from the fetch result and the style
    /// context handed over by the host.
    pub fn new(mode: Mode, entries: Vec<TimelineEntry>, styles: TimelineStyles) -> Self {
        let viewer = ViewerState::new(&entries);
        let basics = [
            TextInputState::with_content(&styles.title),
            TextInputState::with_content(&styles.description),
        ];
        let styling = [
            TextInputState::with_content(&styles.event_background_color),
            TextInputState::with_content(&styles.event_border_color),
            TextInputState::with_content(&styles.event_text_color),
            TextInputState::with_content(&styles.milestone_background_color),
            TextInputState::with_content(&styles.milestone_border_color),
            TextInputState::with_content(&styles.milestone_text_color),
        ];
        let session = EditorSession::new(entries.clone(), styles);

        let mut app = Self {
            mode,
            should_quit: false,
            overlay: Overlay::None,
            entries,
            viewer,
            session,
            items_cursor: 0,
            items_focus: ItemsFocus::List,
            form: None,
            basics,
            basics_focus: 0,
            styling,
            styling_focus: 0,
            save_requested: false,
            save_in_progress: false,
            cancel_requested: false,
            notice: None,
            notice_ttl: 0,
            tick: 0,
        };

        if mode == Mode::Editor {
            app.session.auto_select_first();
            if let Some(index) = app.session.current_index() {
                app.items_cursor = index;
                app.open_form();
            }
        }
        app
    }

    /// Advance animations and expire transient notices.
    pub fn tick(&mut self) {
        self.tick += 1;
        if self.notice_ttl > 0 {
            self.notice_ttl -= 1;
            if self.notice_ttl == 0 {
                self.notice = None;
            }
        }
    }

    /// Show a transient notice in the status bar.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.notice_ttl = NOTICE_TICKS;
    }

    /// Mark the in-flight save as accepted by the host.
    pub fn save_succeeded(&mut self) {
        self.save_in_progress = false;
        self.set_notice("Saved");
    }

    /// Mark the in-flight save as failed; blocks until dismissed.
    pub fn save_failed(&mut self, message: String) {
        self.save_in_progress = false;
        self.overlay = Overlay::SaveError(message);
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Overlays are modal
        match &self.overlay {
            Overlay::Help => {
                // Any key closes the help overlay
                self.overlay = Overlay::None;
                return;
            }
            Overlay::SaveError(_) => {
                if matches!(action, Action::Select | Action::Back) {
                    self.overlay = Overlay::None;
                }
                return;
            }
            Overlay::ConfirmCancel => {
                match action {
                    Action::Select => {
                        self.overlay = Overlay::None;
                        self.cancel_requested = true;
                    }
                    Action::Back | Action::Quit => self.overlay = Overlay::None,
                    _ => {}
                }
                return;
            }
            Overlay::None => {}
        }

        match action {
            Action::Help => {
                self.overlay = Overlay::Help;
                return;
            }
            Action::Quit => {
                match self.mode {
                    Mode::Viewer => self.should_quit = true,
                    // Leaving the editor discards staged edits; confirm first
                    Mode::Editor => self.overlay = Overlay::ConfirmCancel,
                }
                return;
            }
            _ => {}
        }

        match self.mode {
            Mode::Viewer => self.handle_viewer_action(action),
            Mode::Editor => self.handle_editor_action(action),
        }
    }

    fn handle_viewer_action(&mut self, action: Action) {
        match action {
            Action::Select => self.viewer.select_entry(self.viewer.focused()),
            Action::FocusNext => self.viewer.focus_next(),
            Action::FocusPrev => self.viewer.focus_prev(),
            Action::ShiftEarlier(granularity) => {
                self.viewer.shift_window(ShiftDirection::Earlier, granularity);
            }
            Action::ShiftLater(granularity) => {
                self.viewer.shift_window(ShiftDirection::Later, granularity);
            }
            Action::ZoomIn => self.viewer.zoom(ZoomDirection::In),
            Action::ZoomOut => self.viewer.zoom(ZoomDirection::Out),
            Action::Fit => self.viewer.fit_all(),
            Action::Back => self.should_quit = true,
            // Unhandled keys are ignored without side effects
            _ => {}
        }
    }

    fn handle_editor_action(&mut self, action: Action) {
        match action {
            Action::FocusNext => {
                if self.session.can_advance() {
                    self.session.advance();
                }
            }
            Action::FocusPrev => {
                if self.session.can_retreat() {
                    self.session.retreat();
                }
            }
            Action::Save => {
                // The save action is enabled only on the final step
                if self.session.can_save() && !self.save_in_progress {
                    self.save_requested = true;
                }
            }
            Action::Back => {
                if self.session.step() == EditStep::Items
                    && self.items_focus == ItemsFocus::Form
                {
                    self.items_focus = ItemsFocus::List;
                } else {
                    self.overlay = Overlay::ConfirmCancel;
                }
            }
            _ => {
                if self.session.step() == EditStep::Items {
                    self.handle_items_action(action);
                }
            }
        }
    }

    fn handle_items_action(&mut self, action: Action) {
        match action {
            Action::Up if self.items_focus == ItemsFocus::List => {
                self.items_cursor = self.items_cursor.saturating_sub(1);
            }
            Action::Down if self.items_focus == ItemsFocus::List => {
                if self.items_cursor + 1 < self.session.entries().len() {
                    self.items_cursor += 1;
                }
            }
            Action::Select if self.items_focus == ItemsFocus::List => {
                if self.session.entries().is_empty() {
                    return;
                }
                // Re-selecting the open entry keeps the form as it is
                let already_open = self.session.current_index() == Some(self.items_cursor)
                    && self.form.is_some();
                self.session.select_existing(self.items_cursor);
                if !already_open {
                    self.open_form();
                }
                self.items_focus = ItemsFocus::Form;
            }
            Action::Add => {
                self.session.add_new();
                self.items_cursor = self.session.entries().len() - 1;
                self.open_form();
                self.items_focus = ItemsFocus::Form;
            }
            Action::Delete if self.items_focus == ItemsFocus::List => {
                if self.session.entries().is_empty() {
                    return;
                }
                self.session.delete_entry(self.items_cursor);
                self.form = None;
                self.items_cursor = self
                    .items_cursor
                    .min(self.session.entries().len().saturating_sub(1));
            }
            _ => {}
        }
    }

    /// Intercept keys that belong to a focused text field. Returns `true`
    /// when the key was consumed.
    pub fn handle_editor_key(&mut self, key: KeyEvent) -> bool {
        if self.mode != Mode::Editor || self.overlay != Overlay::None {
            return false;
        }
        match self.session.step() {
            EditStep::Basics => self.handle_settings_key(key, false),
            EditStep::Styling => self.handle_settings_key(key, true),
            EditStep::Items => self.handle_form_key(key),
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent, styling: bool) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        let handled = {
            let (inputs, focus) = if styling {
                (&mut self.styling[..], &mut self.styling_focus)
            } else {
                (&mut self.basics[..], &mut self.basics_focus)
            };
            match key.code {
                KeyCode::Up => {
                    *focus = focus.saturating_sub(1);
                    true
                }
                KeyCode::Down | KeyCode::Enter => {
                    if *focus + 1 < inputs.len() {
                        *focus += 1;
                    }
                    true
                }
                _ => edit_input(&mut inputs[*focus], key),
            }
        };

        if handled {
            if styling {
                self.sync_styling();
            } else {
                self.sync_basics();
            }
        }
        handled
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        if self.items_focus != ItemsFocus::Form {
            return false;
        }
        let Some(form) = self.form.as_mut() else {
            return false;
        };

        // Ctrl+Enter inserts a newline into the description body
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Enter && form.focus == FormField::Description {
                form.description.input_mut().insert('\n');
                self.commit_current_form();
                return true;
            }
            return false;
        }

        let handled = match key.code {
            KeyCode::Up => {
                form.focus = form.focus.prev();
                true
            }
            KeyCode::Down | KeyCode::Enter => {
                form.focus = form.focus.next();
                true
            }
            KeyCode::Char(' ') if form.focus == FormField::Milestone => {
                form.milestone = !form.milestone;
                true
            }
            _ => match form.focus {
                FormField::Title => edit_input(&mut form.title, key),
                FormField::Date => edit_input(&mut form.date, key),
                FormField::Milestone => false,
                FormField::Description => edit_input(form.description.input_mut(), key),
            },
        };

        if handled {
            self.commit_current_form();
        }
        handled
    }

    /// Open the form for the session's current entry.
    ///
    /// The previous form (and its description editor) is dropped before the
    /// replacement is constructed; the editor component is exclusively owned.
    fn open_form(&mut self) {
        self.form = None;
        if let Some(index) = self.session.current_index() {
            if let Some(entry) = self.session.entries().get(index) {
                self.form = Some(EntryForm::for_entry(index, entry));
            }
        }
    }

    /// Re-validate the form and commit it into the working collection.
    fn commit_current_form(&mut self) {
        if let Some(form) = &self.form {
            // A rejected commit surfaces through the session's validation
            // message; the partial edit stays in the form only.
            let _ = self.session.commit_fields(&form.fields());
        }
    }

    fn sync_basics(&mut self) {
        let styles = self.session.styles_mut();
        styles.title = self.basics[0].content().to_string();
        styles.description = self.basics[1].content().to_string();
    }

    fn sync_styling(&mut self) {
        let styles = self.session.styles_mut();
        styles.event_background_color = self.styling[0].content().to_string();
        styles.event_border_color = self.styling[1].content().to_string();
        styles.event_text_color = self.styling[2].content().to_string();
        styles.milestone_background_color = self.styling[3].content().to_string();
        styles.milestone_border_color = self.styling[4].content().to_string();
        styles.milestone_text_color = self.styling[5].content().to_string();
    }
}

/// Apply an editing key to a text input. Returns `true` when consumed.
fn edit_input(input: &mut TextInputState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            true
        }
        KeyCode::Right => {
            input.move_right();
            true
        }
        KeyCode::Home => {
            input.move_home();
            true
        }
        KeyCode::End => {
            input.move_end();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronoline_engine::{EditState, ValidationError};

    fn entry(content: &str, start: &str) -> TimelineEntry {
        TimelineEntry {
            content: content.into(),
            start: start.into(),
            ..Default::default()
        }
    }

    fn editor_app(entries: Vec<TimelineEntry>) -> App {
        App::new(Mode::Editor, entries, TimelineStyles::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            assert!(app.handle_editor_key(key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn test_editor_auto_selects_first_entry_once() {
        let app = editor_app(vec![entry("First", "2024-01-01"), entry("Second", "2024-02-01")]);
        assert_eq!(app.session.current_index(), Some(0));
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.title.content(), "First");
        assert_eq!(form.description.entry_index(), 0);
    }

    #[test]
    fn test_empty_editor_has_hidden_form() {
        let mut app = editor_app(Vec::new());
        assert_eq!(app.session.edit_state(), EditState::Idle);
        assert!(app.form.is_none());

        // addNew transitions to Editing(0) with blank fields
        app.session.advance();
        app.session.advance();
        app.handle_action(Action::Add);
        assert_eq!(app.session.edit_state(), EditState::Editing(0));
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.fields(), FormFields::default());
    }

    #[test]
    fn test_reselecting_open_entry_keeps_form_state() {
        let mut app = editor_app(vec![entry("First", "2024-01-01")]);
        app.session.advance();
        app.session.advance();
        app.items_focus = ItemsFocus::Form;

        // Stage an uncommitted partial edit in the form
        type_str(&mut app, "!");
        app.items_focus = ItemsFocus::List;
        app.handle_action(Action::Select);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.title.content(), "First!");
        assert_eq!(app.items_focus, ItemsFocus::Form);
    }

    #[test]
    fn test_switching_entries_rebuilds_description_editor() {
        let mut app = editor_app(vec![
            entry("First", "2024-01-01"),
            entry("Second", "2024-02-01"),
        ]);
        app.session.advance();
        app.session.advance();
        assert_eq!(app.form.as_ref().unwrap().description.entry_index(), 0);

        app.items_focus = ItemsFocus::List;
        app.handle_action(Action::Down);
        app.handle_action(Action::Select);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.description.entry_index(), 1);
        assert_eq!(form.title.content(), "Second");
    }

    #[test]
    fn test_delete_hides_form_and_returns_to_idle() {
        let mut app = editor_app(vec![entry("Only", "2024-01-01")]);
        app.session.advance();
        app.session.advance();
        app.items_focus = ItemsFocus::List;

        app.handle_action(Action::Delete);
        assert_eq!(app.session.edit_state(), EditState::Idle);
        assert!(app.form.is_none());
        assert_eq!(app.items_cursor, 0);
    }

    #[test]
    fn test_form_typing_commits_valid_edits_live() {
        let mut app = editor_app(vec![entry("Launch", "2024-01-01")]);
        app.session.advance();
        app.session.advance();
        app.items_focus = ItemsFocus::Form;

        type_str(&mut app, "!");
        assert_eq!(app.session.entries()[0].content, "Launch!");
        assert!(app.session.validation().is_none());
    }

    #[test]
    fn test_form_validation_blocks_partial_commit() {
        let mut app = editor_app(vec![entry("Launch", "2024-01-01")]);
        app.session.advance();
        app.session.advance();
        app.items_focus = ItemsFocus::Form;

        // Each keystroke commits while still valid; the final, empty title
        // fails validation and never reaches the collection
        for _ in 0.."Launch".len() {
            app.handle_editor_key(key(KeyCode::Backspace));
        }
        assert_eq!(
            app.session.validation(),
            Some(ValidationError::MissingContent)
        );
        assert_eq!(app.session.entries()[0].content, "L");
    }

    #[test]
    fn test_milestone_toggle_with_space() {
        let mut app = editor_app(vec![entry("Launch", "2024-01-01")]);
        app.session.advance();
        app.session.advance();
        app.items_focus = ItemsFocus::Form;

        let form = app.form.as_mut().unwrap();
        form.focus = FormField::Milestone;
        assert!(app.handle_editor_key(key(KeyCode::Char(' '))));
        assert!(app.form.as_ref().unwrap().milestone);
        assert!(app.session.entries()[0].milestone);
    }

    #[test]
    fn test_save_gated_to_final_step() {
        let mut app = editor_app(vec![entry("Launch", "2024-01-01")]);
        app.handle_action(Action::Save);
        assert!(!app.save_requested);

        app.handle_action(Action::FocusNext);
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::Save);
        assert!(app.save_requested);
    }

    #[test]
    fn test_save_error_overlay_blocks_until_dismissed() {
        let mut app = editor_app(vec![entry("Launch", "2024-01-01")]);
        app.save_failed("host returned status 500".into());
        assert!(matches!(app.overlay, Overlay::SaveError(_)));

        // Other actions are swallowed while the failure is showing
        app.handle_action(Action::FocusNext);
        assert!(matches!(app.overlay, Overlay::SaveError(_)));
        assert_eq!(app.session.step(), EditStep::Basics);

        app.handle_action(Action::Select);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_cancel_flow_requests_host_notification() {
        let mut app = editor_app(Vec::new());
        app.handle_action(Action::Back);
        assert_eq!(app.overlay, Overlay::ConfirmCancel);

        app.handle_action(Action::Select);
        assert!(app.cancel_requested);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_settings_typing_updates_styles() {
        let mut app = editor_app(Vec::new());
        type_str(&mut app, "History");
        assert_eq!(app.session.styles().title, "History");

        // Styling step edits the color fields
        app.handle_action(Action::FocusNext);
        assert_eq!(app.session.step(), EditStep::Styling);
        for _ in 0.."#F0F6FA".len() {
            app.handle_editor_key(key(KeyCode::Backspace));
        }
        type_str(&mut app, "#123456");
        assert_eq!(app.session.styles().event_background_color, "#123456");
    }

    #[test]
    fn test_viewer_ignores_editor_actions() {
        let mut app = App::new(
            Mode::Viewer,
            vec![entry("Launch", "2024-01-01")],
            TimelineStyles::default(),
        );
        app.handle_action(Action::Add);
        app.handle_action(Action::Delete);
        app.handle_action(Action::Save);
        assert_eq!(app.session.entries().len(), 1);
        assert!(!app.save_requested);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_notice_expires_after_ttl() {
        let mut app = editor_app(Vec::new());
        app.save_succeeded();
        assert_eq!(app.notice.as_deref(), Some("Saved"));

        for _ in 0..NOTICE_TICKS {
            app.tick();
        }
        assert!(app.notice.is_none());
    }
}
