//! Reusable widgets for the chronoline TUI.

pub mod status_bar;
pub mod tabs;
pub mod text_input;

pub use status_bar::{KeyHint, StatusBar};
pub use tabs::StepTabs;
pub use text_input::{TextInput, TextInputState};
