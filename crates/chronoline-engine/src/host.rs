//! Host boundary: one fetch and one save per widget instance.
//!
//! The embedding host is a black box reached through two fixed-shape JSON
//! exchanges. There is no pagination, no retry, and no cancellation; every
//! failure is terminal for the operation that hit it.

use crate::entry::{collect_timeline_data, TimelineEntry};
use crate::styles::TimelineStyles;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Response marker the host returns for an accepted save.
pub const SUCCESS_SENTINEL: &str = "success";

/// Errors crossing the host boundary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Transport-level failure reaching the host.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success status code.
    #[error("host returned status {0}")]
    Status(u16),

    /// The host answered a save without the success sentinel.
    #[error("save rejected by host (result: {result:?})")]
    Rejected {
        /// The `result` field the host actually returned.
        result: String,
    },

    /// A host response or payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workbench file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Wire shape of the save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePayload {
    pub title: String,
    pub description: String,
    pub event_background_color: String,
    pub event_border_color: String,
    pub event_text_color: String,
    pub milestone_background_color: String,
    pub milestone_border_color: String,
    pub milestone_text_color: String,
    /// The filtered entry collection, stringified.
    pub timeline_data: String,
}

impl SavePayload {
    /// Bundle the style fields with the working collection, dropping
    /// entries that fail the savable invariant.
    pub fn assemble(
        styles: &TimelineStyles,
        entries: &[TimelineEntry],
    ) -> Result<Self, HostError> {
        let kept = collect_timeline_data(entries);
        let timeline_data = serde_json::to_string(&kept)?;
        Ok(Self {
            title: styles.title.clone(),
            description: styles.description.clone(),
            event_background_color: styles.event_background_color.clone(),
            event_border_color: styles.event_border_color.clone(),
            event_text_color: styles.event_text_color.clone(),
            milestone_background_color: styles.milestone_background_color.clone(),
            milestone_border_color: styles.milestone_border_color.clone(),
            milestone_text_color: styles.milestone_text_color.clone(),
            timeline_data,
        })
    }

    /// The style fields of the payload as a [`TimelineStyles`] value.
    pub fn styles(&self) -> TimelineStyles {
        TimelineStyles {
            title: self.title.clone(),
            description: self.description.clone(),
            event_background_color: self.event_background_color.clone(),
            event_border_color: self.event_border_color.clone(),
            event_text_color: self.event_text_color.clone(),
            milestone_background_color: self.milestone_background_color.clone(),
            milestone_border_color: self.milestone_border_color.clone(),
            milestone_text_color: self.milestone_text_color.clone(),
        }
    }

    /// Decode the stringified entry collection.
    pub fn entries(&self) -> Result<Vec<TimelineEntry>, HostError> {
        Ok(serde_json::from_str(&self.timeline_data)?)
    }
}

/// Wire shape of the save response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub result: String,
}

impl SaveResponse {
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS_SENTINEL
    }
}

/// Events reported to the embedding host around editor actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Save,
    Cancel,
}

/// Phase of a two-phase lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Start,
    End,
}

/// Optional host capability: lifecycle notifications around save/cancel.
///
/// A degraded host simply does not expose a notifier; callers treat the
/// missing capability as a no-op rather than branching structurally.
pub trait LifecycleNotifier: Send + Sync {
    fn notify(&self, event: LifecycleEvent, phase: LifecyclePhase);
}

/// Notifier that reports lifecycle transitions through tracing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl LifecycleNotifier for TracingNotifier {
    fn notify(&self, event: LifecycleEvent, phase: LifecyclePhase) {
        tracing::info!(target: "chronoline::lifecycle", ?event, ?phase, "host notification");
    }
}

/// Remote course-platform host reached over HTTP.
///
/// Handler URLs are the platform's `get_timeline_data` and `save_timeline`
/// endpoints under a per-widget base URL. Requests are single-shot with the
/// client's default (unbounded) timeout; a hung request leaves the widget in
/// its pre-data state, which is the documented behavior.
#[derive(Debug)]
pub struct HttpHost {
    client: reqwest::Client,
    base_url: String,
    styles: TimelineStyles,
    notifier: TracingNotifier,
}

impl HttpHost {
    /// Create a client for the widget instance rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("chronoline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            styles: TimelineStyles::default(),
            notifier: TracingNotifier,
        })
    }

    /// Seed the initial style context.
    ///
    /// An embedding platform renders current style values into the widget
    /// context at load time; this is that hand-off. Without it the editor
    /// starts from defaults.
    #[must_use]
    pub fn with_styles(mut self, styles: TimelineStyles) -> Self {
        self.styles = styles;
        self
    }

    fn handler_url(&self, handler: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), handler)
    }

    /// Fetch the full entry collection. One request, empty JSON body.
    pub async fn fetch_entries(&self) -> Result<Vec<TimelineEntry>, HostError> {
        let resp = self
            .client
            .post(self.handler_url("get_timeline_data"))
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HostError::Status(status.as_u16()));
        }
        Ok(resp.json().await?)
    }

    /// Submit the save payload. The response must carry the success sentinel.
    pub async fn save_timeline(&self, payload: &SavePayload) -> Result<(), HostError> {
        let resp = self
            .client
            .post(self.handler_url("save_timeline"))
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HostError::Status(status.as_u16()));
        }

        let body: SaveResponse = resp.json().await?;
        if body.is_success() {
            Ok(())
        } else {
            Err(HostError::Rejected { result: body.result })
        }
    }
}

/// On-disk document for the workbench host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WorkbenchDocument {
    #[serde(flatten)]
    styles: TimelineStyles,
    #[serde(default)]
    items: Vec<TimelineEntry>,
}

/// Local single-file host for working outside a course platform.
///
/// This is the degraded host: it answers both exchanges from a JSON file
/// and exposes no lifecycle-notify capability.
#[derive(Debug)]
pub struct WorkbenchHost {
    path: PathBuf,
}

impl WorkbenchHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_document(&self) -> Result<WorkbenchDocument, HostError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            // A fresh workbench starts empty
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Ok(WorkbenchDocument::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn store_document(&self, doc: &WorkbenchDocument) -> Result<(), HostError> {
        let raw = serde_json::to_string_pretty(doc)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, raw).await?;
        Ok(())
    }

    /// Write the canned demo scenario unless the file already exists.
    pub async fn seed_sample(&self) -> Result<(), HostError> {
        if fs::try_exists(&self.path).await? {
            return Ok(());
        }
        let doc = WorkbenchDocument {
            styles: TimelineStyles::default(),
            items: sample_entries(),
        };
        self.store_document(&doc).await
    }

    pub async fn fetch_entries(&self) -> Result<Vec<TimelineEntry>, HostError> {
        Ok(self.load_document().await?.items)
    }

    pub async fn save_timeline(&self, payload: &SavePayload) -> Result<(), HostError> {
        let doc = WorkbenchDocument {
            styles: payload.styles(),
            items: payload.entries()?,
        };
        self.store_document(&doc).await
    }

    pub async fn initial_styles(&self) -> TimelineStyles {
        match self.load_document().await {
            Ok(doc) => doc.styles,
            Err(err) => {
                tracing::error!(%err, "failed to read workbench styles; using defaults");
                TimelineStyles::default()
            }
        }
    }
}

/// Handle over the concrete host implementations.
#[derive(Debug)]
pub enum HostHandle {
    Http(HttpHost),
    Workbench(WorkbenchHost),
}

impl HostHandle {
    /// Fetch the full entry collection.
    pub async fn fetch_entries(&self) -> Result<Vec<TimelineEntry>, HostError> {
        match self {
            Self::Http(host) => host.fetch_entries().await,
            Self::Workbench(host) => host.fetch_entries().await,
        }
    }

    /// Fetch, falling back to an empty collection on failure.
    ///
    /// The failure is logged and the widget stays inert with no retry
    /// affordance; this is the documented fetch-error behavior.
    pub async fn fetch_entries_or_inert(&self) -> Vec<TimelineEntry> {
        match self.fetch_entries().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(%err, "error fetching timeline data");
                Vec::new()
            }
        }
    }

    /// Submit the save payload.
    pub async fn save_timeline(&self, payload: &SavePayload) -> Result<(), HostError> {
        match self {
            Self::Http(host) => host.save_timeline(payload).await,
            Self::Workbench(host) => host.save_timeline(payload).await,
        }
    }

    /// Style context supplied by the host at widget initialization.
    pub async fn initial_styles(&self) -> TimelineStyles {
        match self {
            Self::Http(host) => host.styles.clone(),
            Self::Workbench(host) => host.initial_styles().await,
        }
    }

    /// The lifecycle-notify capability, when the host has one.
    pub fn notifier(&self) -> Option<&dyn LifecycleNotifier> {
        match self {
            Self::Http(host) => Some(&host.notifier),
            Self::Workbench(_) => None,
        }
    }

    /// Notify the host of a lifecycle transition; no-op on degraded hosts.
    pub fn notify(&self, event: LifecycleEvent, phase: LifecyclePhase) {
        if let Some(notifier) = self.notifier() {
            notifier.notify(event, phase);
        }
    }
}

/// The canned two-entry scenario shipped for demos and first runs.
pub fn sample_entries() -> Vec<TimelineEntry> {
    let mut first = TimelineEntry {
        content: "Item 1".into(),
        start: "2023-04-20".into(),
        description: "Description 1".into(),
        milestone: false,
        ..Default::default()
    };
    first.extra.insert("id".into(), serde_json::json!(1));

    let mut second = TimelineEntry {
        content: "Item 2".into(),
        start: "2023-04-14".into(),
        description: "Description 2".into(),
        milestone: true,
        ..Default::default()
    };
    second.extra.insert("id".into(), serde_json::json!(2));

    vec![first, second]
}
