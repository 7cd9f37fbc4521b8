//! Timeline entry data model.
//!
//! Entries are the unit of exchange with the host: fetched once as a JSON
//! array, edited in memory, and saved back filtered to complete entries.
//! Fields the engine does not know about are carried through untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Character budget for list-summary titles.
pub const TITLE_BUDGET: usize = 25;

/// Placeholder title for entries that have none yet.
pub const UNTITLED: &str = "Untitled timeline item";

/// One timeline event or milestone record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Short title shown on the timeline.
    #[serde(default)]
    pub content: String,

    /// Date string as supplied by the host, kept verbatim for round-tripping.
    #[serde(default)]
    pub start: String,

    /// Rich-text body. Opaque to this layer; the host is the trust boundary.
    #[serde(default)]
    pub description: String,

    /// Milestone entries get distinct visual treatment.
    #[serde(default)]
    pub milestone: bool,

    /// Fields the engine does not model (ids etc.) pass through opaquely.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Styling class hint handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryClass {
    Event,
    Milestone,
}

impl EntryClass {
    /// The class name used on the wire and in theming lookups.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Milestone => "milestone",
        }
    }
}

impl TimelineEntry {
    /// An entry can be saved only when both title and start date are present.
    pub fn is_savable(&self) -> bool {
        !self.content.is_empty() && !self.start.is_empty()
    }

    /// Styling class for the rendering layer.
    pub fn class(&self) -> EntryClass {
        if self.milestone {
            EntryClass::Milestone
        } else {
            EntryClass::Event
        }
    }

    /// Parse the start field as a calendar date.
    ///
    /// Accepts `YYYY-MM-DD`, RFC 3339, and `YYYY-MM-DDTHH:MM:SS` forms.
    /// Returns `None` for anything else; callers skip unparseable entries.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let raw = self.start.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.date());
        }
        None
    }

    /// Title for list summaries, truncated to [`TITLE_BUDGET`] characters
    /// with an ellipsis marker. Display-only; stored data is never touched.
    pub fn display_title(&self) -> String {
        let title = if self.content.is_empty() {
            UNTITLED
        } else {
            &self.content
        };
        if title.chars().count() <= TITLE_BUDGET {
            title.to_string()
        } else {
            let mut out: String = title.chars().take(TITLE_BUDGET).collect();
            out.push_str("...");
            out
        }
    }
}

/// The save-time filter: keeps only entries satisfying the savable
/// invariant, preserving order. Incomplete entries are dropped without
/// further notice; the drop count is logged so the loss is observable.
pub fn collect_timeline_data(entries: &[TimelineEntry]) -> Vec<TimelineEntry> {
    let kept: Vec<TimelineEntry> = entries.iter().filter(|e| e.is_savable()).cloned().collect();
    let dropped = entries.len() - kept.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropping incomplete entries from save payload");
    }
    kept
}

/// Earliest and latest parseable entry dates, or `None` if no entry has one.
pub fn date_bounds(entries: &[TimelineEntry]) -> Option<(NaiveDate, NaiveDate)> {
    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    for date in entries.iter().filter_map(TimelineEntry::start_date) {
        bounds = match bounds {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        };
    }
    bounds
}
