//! Viewer selection and window state.
//!
//! The rendering layer owns layout; this state owns what is selected, which
//! date range is visible, and whether entries sit off-screen on either side.
//! Overflow is recomputed on every window change.

use crate::entry::{date_bounds, TimelineEntry};
use chrono::{Duration, Local, NaiveDate};

/// Fixed ratio applied per zoom step (5% of the visible range).
const ZOOM_RATIO: f64 = 0.05;

/// Half-width of the fallback window shown when no entry has a date.
const EMPTY_WINDOW_DAYS: i64 = 30;

/// Direction of a window shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Earlier,
    Later,
}

/// Unit of a window shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
}

impl Granularity {
    fn days(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
        }
    }
}

/// Direction of a zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Which sides of the visible window have additional off-screen entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overflow {
    pub start: bool,
    pub end: bool,
}

impl Overflow {
    /// Status message enumerating the overflowing side(s), or `None` when
    /// everything is in view.
    pub fn message(self) -> Option<&'static str> {
        match (self.start, self.end) {
            (true, true) => Some("More entries before and after the visible range"),
            (true, false) => Some("More entries before the visible range"),
            (false, true) => Some("More entries after the visible range"),
            (false, false) => None,
        }
    }
}

/// Per-instance viewer state.
#[derive(Debug)]
pub struct ViewerState {
    /// Index of the selected entry (if any).
    selected: Option<usize>,
    /// Index of the keyboard-focused entry.
    focused: usize,
    /// Left edge of the visible window.
    window_start: NaiveDate,
    /// Right edge of the visible window.
    window_end: NaiveDate,
    /// Earliest entry date, computed once after fetch.
    data_min: Option<NaiveDate>,
    /// Latest entry date, computed once after fetch.
    data_max: Option<NaiveDate>,
    /// Off-screen indicators for the current window.
    overflow: Overflow,
    /// Number of entries in the collection.
    entry_count: usize,
}

impl ViewerState {
    /// Build the state for a fetched collection; the initial window fits
    /// all entries (or brackets today when nothing is dated).
    pub fn new(entries: &[TimelineEntry]) -> Self {
        let bounds = date_bounds(entries);
        let (window_start, window_end) = match bounds {
            Some((min, max)) => (min, max),
            None => {
                let today = Local::now().date_naive();
                (
                    today - Duration::days(EMPTY_WINDOW_DAYS),
                    today + Duration::days(EMPTY_WINDOW_DAYS),
                )
            }
        };

        let mut state = Self {
            selected: None,
            focused: 0,
            window_start,
            window_end,
            data_min: bounds.map(|(min, _)| min),
            data_max: bounds.map(|(_, max)| max),
            overflow: Overflow::default(),
            entry_count: entries.len(),
        };
        state.recompute_overflow();
        state
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        (self.window_start, self.window_end)
    }

    pub fn data_min(&self) -> Option<NaiveDate> {
        self.data_min
    }

    pub fn data_max(&self) -> Option<NaiveDate> {
        self.data_max
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Select an entry for the detail panel. Re-selecting the current entry
    /// or passing an out-of-range index changes nothing.
    pub fn select_entry(&mut self, index: usize) {
        if index < self.entry_count && self.selected != Some(index) {
            self.selected = Some(index);
            self.focused = index;
        }
    }

    /// Move keyboard focus to the next entry. Stops at the last (no wrap).
    pub fn focus_next(&mut self) {
        if self.entry_count > 0 && self.focused + 1 < self.entry_count {
            self.focused += 1;
        }
    }

    /// Move keyboard focus to the previous entry. Stops at the first.
    pub fn focus_prev(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    /// Shift both window bounds by one day or week unit.
    pub fn shift_window(&mut self, direction: ShiftDirection, granularity: Granularity) {
        let delta = Duration::days(granularity.days());
        match direction {
            ShiftDirection::Earlier => {
                self.window_start -= delta;
                self.window_end -= delta;
            }
            ShiftDirection::Later => {
                self.window_start += delta;
                self.window_end += delta;
            }
        }
        self.recompute_overflow();
    }

    /// Apply a fixed-ratio zoom step. Zooming in never collapses the window
    /// below a single day.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let range = (self.window_end - self.window_start).num_days().max(1);
        let step = ((range as f64) * ZOOM_RATIO).round().max(1.0) as i64;
        let left = step / 2;
        let right = step - left;

        match direction {
            ZoomDirection::In => {
                let new_start = self.window_start + Duration::days(left);
                let new_end = self.window_end - Duration::days(right);
                if new_end > new_start {
                    self.window_start = new_start;
                    self.window_end = new_end;
                }
            }
            ZoomDirection::Out => {
                self.window_start -= Duration::days(left);
                self.window_end += Duration::days(right);
            }
        }
        self.recompute_overflow();
    }

    /// Fit the window to the full data range. No-op when nothing is dated.
    pub fn fit_all(&mut self) {
        if let (Some(min), Some(max)) = (self.data_min, self.data_max) {
            self.window_start = min;
            self.window_end = max;
            self.recompute_overflow();
        }
    }

    /// Window-change notification from the rendering layer.
    pub fn apply_window(&mut self, start: NaiveDate, end: NaiveDate) {
        self.window_start = start;
        self.window_end = end.max(start);
        self.recompute_overflow();
    }

    fn recompute_overflow(&mut self) {
        self.overflow = Overflow {
            start: self.data_min.is_some_and(|min| self.window_start > min),
            end: self.data_max.is_some_and(|max| self.window_end < max),
        };
    }
}
