//! Timeline-level presentation settings.
//!
//! These fields ride along with every save: a title and description for the
//! timeline itself, plus the color treatment for regular events and
//! milestones. Hosts may hand back edited values on the next load.

use serde::{Deserialize, Serialize};

/// Presentation settings saved alongside the entry collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStyles {
    /// Title of the timeline.
    #[serde(default)]
    pub title: String,

    /// Description of the timeline.
    #[serde(default)]
    pub description: String,

    /// Background color of default events.
    #[serde(default = "default_event_background_color")]
    pub event_background_color: String,

    /// Border color of default events.
    #[serde(default = "default_event_border_color")]
    pub event_border_color: String,

    /// Text color of default events.
    #[serde(default = "default_event_text_color")]
    pub event_text_color: String,

    /// Background color of milestone entries.
    #[serde(default = "default_milestone_background_color")]
    pub milestone_background_color: String,

    /// Border color of milestone entries.
    #[serde(default = "default_milestone_border_color")]
    pub milestone_border_color: String,

    /// Text color of milestone entries.
    #[serde(default = "default_milestone_text_color")]
    pub milestone_text_color: String,
}

fn default_event_background_color() -> String {
    "#F0F6FA".into()
}

fn default_event_border_color() -> String {
    "#80B6D5".into()
}

fn default_event_text_color() -> String {
    "#000000".into()
}

fn default_milestone_background_color() -> String {
    "#4092BF".into()
}

fn default_milestone_border_color() -> String {
    "#FFFFFF".into()
}

fn default_milestone_text_color() -> String {
    "#FFFFFF".into()
}

impl Default for TimelineStyles {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            event_background_color: default_event_background_color(),
            event_border_color: default_event_border_color(),
            event_text_color: default_event_text_color(),
            milestone_background_color: default_milestone_background_color(),
            milestone_border_color: default_milestone_border_color(),
            milestone_text_color: default_milestone_text_color(),
        }
    }
}

impl TimelineStyles {
    /// The six color fields in display order, with their labels.
    pub fn color_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("Event background", &self.event_background_color),
            ("Event border", &self.event_border_color),
            ("Event text", &self.event_text_color),
            ("Milestone background", &self.milestone_background_color),
            ("Milestone border", &self.milestone_border_color),
            ("Milestone text", &self.milestone_text_color),
        ]
    }
}
