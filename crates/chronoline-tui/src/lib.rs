//! chronoline-tui: Terminal UI for the chronoline timeline widget
//!
//! This crate provides both widget surfaces:
//! - Viewer: the timeline canvas, detail panel, and overflow status
//! - Editor: the three-step authoring workflow (basics, styling, items)
//!
//! All state transitions live in plain structs and are testable without a
//! terminal; rendering is exercised through `TestBackend`-style buffers.

mod app;
mod event;
mod richtext;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod timeline;
mod ui;

pub use app::{App, EntryForm, FormField, ItemsFocus, Mode, Overlay};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use chronoline_engine;

use chronoline_engine::{HostError, HostHandle, LifecycleEvent, LifecyclePhase};
use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run one widget instance against a host.
///
/// Exactly one fetch is issued, awaited before state initialization; on
/// fetch failure the widget comes up inert over an empty collection. A
/// failed terminal setup aborts this instance only.
pub async fn run(host: HostHandle, mode: Mode) -> Result<(), Box<dyn std::error::Error>> {
    let entries = host.fetch_entries_or_inert().await;
    let styles = host.initial_styles().await;

    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(mode, entries, styles);

    // 4 Hz tick rate
    let mut events = EventHandler::new(250);
    let host = Arc::new(host);

    let result = run_loop(&mut terminal, &mut app, &mut events, &host).await;

    terminal.show_cursor()?;
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    host: &Arc<HostHandle>,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one save request in flight
    let mut save_handle: Option<JoinHandle<Result<(), HostError>>> = None;

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            screens::render_app(app, area, buf);
        })?;

        // Launch a requested save with the two-phase host notification
        if app.save_requested && save_handle.is_none() {
            app.save_requested = false;
            match app.session.save_payload() {
                Ok(payload) => {
                    host.notify(LifecycleEvent::Save, LifecyclePhase::Start);
                    app.save_in_progress = true;
                    let host = Arc::clone(host);
                    save_handle =
                        Some(tokio::spawn(async move { host.save_timeline(&payload).await }));
                }
                Err(err) => app.save_failed(err.to_string()),
            }
        }

        // Check for a completed save (non-blocking)
        if save_handle.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = save_handle.take() {
                match handle.await {
                    Ok(Ok(())) => {
                        host.notify(LifecycleEvent::Save, LifecyclePhase::End);
                        app.save_succeeded();
                    }
                    Ok(Err(err)) => app.save_failed(err.to_string()),
                    Err(err) => app.save_failed(err.to_string()),
                }
            }
        }

        // Cancel notification; no data changes
        if app.cancel_requested {
            app.cancel_requested = false;
            host.notify(LifecycleEvent::Cancel, LifecyclePhase::Start);
            app.should_quit = true;
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    // Focused text fields see the key first
                    if !app.handle_editor_key(key) {
                        app.handle_action(event::key_to_action(key));
                    }
                }
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {}
            }
        }

        if app.should_quit {
            if let Some(handle) = save_handle.take() {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}

/// Keyboard-contract and navigation tests over the app state machine.
#[cfg(test)]
mod navigation_tests {
    use crate::event::{key_to_action, Action};
    use crate::test_utils::create_viewer_app;
    use chronoline_engine::Granularity;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_arrow_keys_pan_the_window() {
        let mut app = create_viewer_app();
        let (start0, end0) = app.viewer.window();

        app.handle_action(key_to_action(KeyEvent::new(
            KeyCode::Right,
            KeyModifiers::NONE,
        )));
        assert_eq!(app.viewer.window(), (start0 + chrono::Duration::days(1), end0 + chrono::Duration::days(1)));

        app.handle_action(key_to_action(KeyEvent::new(
            KeyCode::Left,
            KeyModifiers::SHIFT,
        )));
        let (start, _) = app.viewer.window();
        assert_eq!(start, start0 - chrono::Duration::days(6));
    }

    #[test]
    fn test_zoom_and_fit_keys() {
        let mut app = create_viewer_app();
        let fitted = app.viewer.window();

        app.handle_action(Action::ZoomIn);
        assert_ne!(app.viewer.window(), fitted);
        assert!(app.viewer.overflow().start && app.viewer.overflow().end);

        app.handle_action(Action::Fit);
        assert_eq!(app.viewer.window(), fitted);
        assert_eq!(app.viewer.overflow().message(), None);
    }

    #[test]
    fn test_focus_ring_and_selection() {
        let mut app = create_viewer_app();
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::FocusNext);
        app.handle_action(Action::Select);
        assert_eq!(app.viewer.selected(), Some(2));

        // Selecting the same entry again changes nothing
        app.handle_action(Action::Select);
        assert_eq!(app.viewer.selected(), Some(2));

        app.handle_action(Action::FocusPrev);
        assert_eq!(app.viewer.focused(), 1);
        assert_eq!(app.viewer.selected(), Some(2));
    }

    #[test]
    fn test_boundary_overflow_flags() {
        let mut app = create_viewer_app();
        assert_eq!(app.viewer.data_min(), Some(date(2024, 1, 10)));
        assert_eq!(app.viewer.data_max(), Some(date(2024, 3, 30)));

        app.handle_action(Action::ShiftLater(Granularity::Day));
        assert!(app.viewer.overflow().start);
        assert!(!app.viewer.overflow().end);

        app.handle_action(Action::ShiftEarlier(Granularity::Day));
        assert_eq!(app.viewer.overflow().message(), None);
    }

    #[test]
    fn test_unhandled_keys_have_no_side_effects() {
        let mut app = create_viewer_app();
        let window = app.viewer.window();

        app.handle_action(key_to_action(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )));
        assert_eq!(app.viewer.window(), window);
        assert_eq!(app.viewer.selected(), None);
        assert!(!app.should_quit);
    }
}
