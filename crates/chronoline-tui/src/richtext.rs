//! Description editor: the rich-text boundary.
//!
//! The description body is opaque rich text edited through an exclusively
//! owned component. At most one instance is live at a time; switching the
//! edited entry drops the old instance before a new one is constructed, so
//! content can never leak between entries.

use crate::ui::widgets::{TextInput, TextInputState};

/// Editor instance bound to one entry's description.
#[derive(Debug)]
pub struct DescriptionEditor {
    /// Index of the entry this instance was opened for.
    entry_index: usize,
    /// The editable body.
    input: TextInputState,
}

impl DescriptionEditor {
    /// Initialize an editor instance against one entry's body.
    pub fn open(entry_index: usize, content: &str) -> Self {
        Self {
            entry_index,
            input: TextInputState::with_content(content),
        }
    }

    /// The entry this instance is bound to.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Current body content.
    pub fn content(&self) -> &str {
        self.input.content()
    }

    /// Mutable access for key handling.
    pub fn input_mut(&mut self) -> &mut TextInputState {
        &mut self.input
    }

    /// Create a widget for rendering.
    pub fn widget(&self) -> TextInput<'_> {
        self.input.widget()
    }
}
