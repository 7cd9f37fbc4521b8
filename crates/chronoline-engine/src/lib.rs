//! chronoline-engine: Headless core for the chronoline timeline widget
//!
//! This crate provides the state logic behind both widget surfaces:
//! - The entry data model and the save-time filter
//! - The host boundary (one fetch, one save per widget instance)
//! - Viewer selection/window state with off-screen overflow detection
//! - The editor list + form + tabbed-step state machine

pub mod entry;
pub mod host;
pub mod session;
pub mod styles;
pub mod viewer;

// Re-export commonly used types
pub use entry::{collect_timeline_data, date_bounds, EntryClass, TimelineEntry};
pub use host::{
    HostError, HostHandle, HttpHost, LifecycleEvent, LifecycleNotifier, LifecyclePhase,
    SavePayload, SaveResponse, TracingNotifier, WorkbenchHost,
};
pub use session::{EditState, EditStep, EditorSession, FormFields, ValidationError};
pub use styles::TimelineStyles;
pub use viewer::{Granularity, Overflow, ShiftDirection, ViewerState, ZoomDirection};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
