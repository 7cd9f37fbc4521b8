//! Editor list + form state machine and tabbed workflow.
//!
//! One session per widget instance, created right after the fetch and
//! discarded with the page. The working collection is mutated in place;
//! nothing is persisted until the explicit save.

use crate::entry::TimelineEntry;
use crate::host::{HostError, SavePayload};
use crate::styles::TimelineStyles;

/// The ordered steps of the editor workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditStep {
    #[default]
    Basics,
    Styling,
    Items,
}

impl EditStep {
    /// All steps in workflow order.
    pub const ALL: [Self; 3] = [Self::Basics, Self::Styling, Self::Items];

    /// Position in the workflow.
    pub fn index(self) -> usize {
        match self {
            Self::Basics => 0,
            Self::Styling => 1,
            Self::Items => 2,
        }
    }

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Basics => "Basic settings",
            Self::Styling => "Styling settings",
            Self::Items => "Item editor",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Basics => Self::Styling,
            Self::Styling | Self::Items => Self::Items,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Items => Self::Styling,
            Self::Styling | Self::Basics => Self::Basics,
        }
    }
}

/// Whether an entry is open in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No entry selected; the form is hidden.
    #[default]
    Idle,
    /// The entry at this index is loaded into the form.
    Editing(usize),
}

/// The editable fields of one entry, as bound to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub content: String,
    pub start: String,
    pub description: String,
    pub milestone: bool,
}

impl FormFields {
    /// Snapshot an entry's editable fields.
    pub fn from_entry(entry: &TimelineEntry) -> Self {
        Self {
            content: entry.content.clone(),
            start: entry.start.clone(),
            description: entry.description.clone(),
            milestone: entry.milestone,
        }
    }
}

/// Why an edit could not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a title is required before the item can be kept")]
    MissingContent,
    #[error("a start date is required before the item can be kept")]
    MissingStart,
}

/// Per-instance editor session state.
#[derive(Debug, Default)]
pub struct EditorSession {
    /// Working copy of the fetched collection.
    entries: Vec<TimelineEntry>,
    /// Which entry is open in the form.
    edit: EditState,
    /// Current workflow step.
    step: EditStep,
    /// Working copy of the timeline-level styles.
    styles: TimelineStyles,
    /// Validation message for the last rejected commit.
    validation: Option<ValidationError>,
    /// Whether the one-shot auto-select has fired.
    auto_selected: bool,
}

impl EditorSession {
    /// Create a session over the fetched collection and style context.
    pub fn new(entries: Vec<TimelineEntry>, styles: TimelineStyles) -> Self {
        Self {
            entries,
            styles,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn styles(&self) -> &TimelineStyles {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut TimelineStyles {
        &mut self.styles
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    /// Index of the entry open in the form.
    pub fn current_index(&self) -> Option<usize> {
        match self.edit {
            EditState::Idle => None,
            EditState::Editing(index) => Some(index),
        }
    }

    /// The entry open in the form.
    pub fn current_entry(&self) -> Option<&TimelineEntry> {
        self.current_index().and_then(|i| self.entries.get(i))
    }

    pub fn validation(&self) -> Option<ValidationError> {
        self.validation
    }

    /// Select the first entry after the initial fetch. Fires at most once
    /// per session; later list refreshes never re-trigger it.
    pub fn auto_select_first(&mut self) {
        if !self.auto_selected {
            self.auto_selected = true;
            if !self.entries.is_empty() {
                self.edit = EditState::Editing(0);
            }
        }
    }

    /// Open an existing entry in the form, clearing any prior validation
    /// error. Out-of-range indices are ignored.
    pub fn select_existing(&mut self, index: usize) {
        if index < self.entries.len() {
            self.edit = EditState::Editing(index);
            self.validation = None;
        }
    }

    /// Append a blank entry and open it in the form.
    pub fn add_new(&mut self) {
        self.entries.push(TimelineEntry::default());
        self.edit = EditState::Editing(self.entries.len() - 1);
        self.validation = None;
        tracing::debug!(count = self.entries.len(), "added blank timeline entry");
    }

    /// Remove an entry; the form hides and the session returns to idle.
    pub fn delete_entry(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
            self.edit = EditState::Idle;
            self.validation = None;
            tracing::debug!(count = self.entries.len(), "deleted timeline entry");
        }
    }

    /// Re-validate the form and commit it into the working collection.
    ///
    /// Incomplete fields leave the collection untouched and record a
    /// validation message for the form to surface. Committing while idle
    /// is a no-op.
    pub fn commit_fields(&mut self, fields: &FormFields) -> Result<(), ValidationError> {
        let EditState::Editing(index) = self.edit else {
            return Ok(());
        };

        let result = if fields.content.is_empty() {
            Err(ValidationError::MissingContent)
        } else if fields.start.is_empty() {
            Err(ValidationError::MissingStart)
        } else {
            Ok(())
        };

        match result {
            Ok(()) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    // Passthrough fields on the entry are preserved
                    entry.content = fields.content.clone();
                    entry.start = fields.start.clone();
                    entry.description = fields.description.clone();
                    entry.milestone = fields.milestone;
                }
                self.validation = None;
            }
            Err(err) => self.validation = Some(err),
        }
        result
    }

    /// Current workflow step.
    pub fn step(&self) -> EditStep {
        self.step
    }

    /// Whether the continue control applies at this step.
    pub fn can_advance(&self) -> bool {
        self.step != EditStep::Items
    }

    /// Whether the back control applies at this step.
    pub fn can_retreat(&self) -> bool {
        self.step != EditStep::Basics
    }

    /// Saving is offered only on the final step.
    pub fn can_save(&self) -> bool {
        !self.can_advance()
    }

    /// Move one step forward, clamped at the last step.
    pub fn advance(&mut self) {
        self.step = self.step.next();
    }

    /// Move one step back, clamped at the first step.
    pub fn retreat(&mut self) {
        self.step = self.step.prev();
    }

    /// Assemble the save request from the working state.
    pub fn save_payload(&self) -> Result<SavePayload, HostError> {
        SavePayload::assemble(&self.styles, &self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(content: &str, start: &str) -> TimelineEntry {
        TimelineEntry {
            content: content.into(),
            start: start.into(),
            ..Default::default()
        }
    }

    fn session_with(entries: Vec<TimelineEntry>) -> EditorSession {
        EditorSession::new(entries, TimelineStyles::default())
    }

    #[test]
    fn test_empty_session_starts_idle_with_hidden_form() {
        let mut session = session_with(Vec::new());
        assert_eq!(session.edit_state(), EditState::Idle);
        assert!(session.current_entry().is_none());

        // Auto-select has nothing to do on an empty collection
        session.auto_select_first();
        assert_eq!(session.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_auto_select_fires_exactly_once() {
        let mut session = session_with(vec![entry("First", "2024-01-01")]);
        session.auto_select_first();
        assert_eq!(session.edit_state(), EditState::Editing(0));

        session.add_new();
        session.delete_entry(1);
        assert_eq!(session.edit_state(), EditState::Idle);

        // A later refresh must not re-select
        session.auto_select_first();
        assert_eq!(session.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_add_new_opens_blank_form_at_end() {
        let mut session = session_with(Vec::new());
        session.add_new();

        assert_eq!(session.edit_state(), EditState::Editing(0));
        let fields = FormFields::from_entry(session.current_entry().unwrap());
        assert_eq!(fields, FormFields::default());
    }

    #[test]
    fn test_delete_returns_to_idle() {
        let mut session = session_with(vec![entry("a", "2024-01-01"), entry("b", "2024-02-01")]);
        session.select_existing(1);
        session.delete_entry(1);

        assert_eq!(session.edit_state(), EditState::Idle);
        assert_eq!(session.entries().len(), 1);

        // Out-of-range delete is ignored
        session.delete_entry(5);
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_select_existing_clears_validation() {
        let mut session = session_with(vec![entry("a", "2024-01-01")]);
        session.add_new();
        let _ = session.commit_fields(&FormFields::default());
        assert!(session.validation().is_some());

        session.select_existing(0);
        assert_eq!(session.edit_state(), EditState::Editing(0));
        assert!(session.validation().is_none());

        // Out of range leaves the form where it was
        session.select_existing(7);
        assert_eq!(session.edit_state(), EditState::Editing(0));
    }

    #[test]
    fn test_commit_requires_content_and_start() {
        let mut session = session_with(Vec::new());
        session.add_new();

        let missing_content = FormFields {
            start: "2024-02-01".into(),
            ..Default::default()
        };
        assert_eq!(
            session.commit_fields(&missing_content),
            Err(ValidationError::MissingContent)
        );
        // The partial edit was not committed
        assert_eq!(session.entries()[0], TimelineEntry::default());
        assert_eq!(session.validation(), Some(ValidationError::MissingContent));

        let missing_start = FormFields {
            content: "Launch".into(),
            ..Default::default()
        };
        assert_eq!(
            session.commit_fields(&missing_start),
            Err(ValidationError::MissingStart)
        );

        let complete = FormFields {
            content: "Launch".into(),
            start: "2024-02-01".into(),
            description: "<p>Go</p>".into(),
            milestone: true,
        };
        assert_eq!(session.commit_fields(&complete), Ok(()));
        assert!(session.validation().is_none());
        let committed = &session.entries()[0];
        assert_eq!(committed.content, "Launch");
        assert!(committed.milestone);
    }

    #[test]
    fn test_commit_preserves_passthrough_fields() {
        let mut first = entry("Kickoff", "2024-01-01");
        first.extra.insert("id".into(), serde_json::json!(9));
        let mut session = session_with(vec![first]);
        session.select_existing(0);

        let fields = FormFields {
            content: "Kickoff (moved)".into(),
            start: "2024-01-08".into(),
            ..Default::default()
        };
        session.commit_fields(&fields).unwrap();
        assert_eq!(
            session.entries()[0].extra.get("id"),
            Some(&serde_json::json!(9))
        );
    }

    #[test]
    fn test_commit_while_idle_is_a_no_op() {
        let mut session = session_with(vec![entry("a", "2024-01-01")]);
        assert_eq!(session.commit_fields(&FormFields::default()), Ok(()));
        assert_eq!(session.entries()[0].content, "a");
        assert!(session.validation().is_none());
    }

    #[test]
    fn test_tab_navigation_clamps_at_both_ends() {
        let mut session = session_with(Vec::new());
        assert_eq!(session.step(), EditStep::Basics);
        assert!(!session.can_retreat());
        assert!(!session.can_save());

        for _ in 0..EditStep::ALL.len() {
            session.advance();
        }
        assert_eq!(session.step(), EditStep::Items);
        assert!(!session.can_advance());
        assert!(session.can_save());

        for _ in 0..5 {
            session.retreat();
        }
        assert_eq!(session.step(), EditStep::Basics);
        assert_eq!(session.step().index(), 0);
    }

    #[test]
    fn test_save_payload_excludes_uncommittable_entry() {
        let mut session = session_with(vec![entry("Kickoff", "2024-01-01")]);
        session.add_new();

        // The new entry never validates; force the save anyway
        let partial = FormFields {
            start: "2024-02-01".into(),
            ..Default::default()
        };
        let _ = session.commit_fields(&partial);

        let payload = session.save_payload().unwrap();
        let saved = payload.entries().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].content, "Kickoff");
    }
}
