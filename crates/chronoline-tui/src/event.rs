//! Event handling for the chronoline TUI.

use chronoline_engine::Granularity;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A tick event for UI updates.
    Tick,
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Event handler that runs in a background task.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tx_clone = tx.clone();

        // Spawn blocking thread for event polling (crossterm uses blocking I/O)
        std::thread::spawn(move || {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Some(Event::Key(key)),
                            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(e) = event {
                            if tx_clone.send(e).is_err() {
                                break;
                            }
                        }
                    }
                } else {
                    // No event, send tick
                    if tx_clone.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Get the next event, blocking until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Help,
    Back,
    Select,
    FocusNext,
    FocusPrev,
    Up,
    Down,
    ShiftEarlier(Granularity),
    ShiftLater(Granularity),
    ZoomIn,
    ZoomOut,
    Fit,
    Add,
    Delete,
    Save,
    None,
}

/// Convert a key event to an action.
///
/// Handled keys never fall through to the terminal; unmapped keys become
/// [`Action::None`] and are ignored without side effects.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('s') => Action::Save,
            _ => Action::None,
        };
    }

    let week = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Esc => Action::Back,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Left => {
            if week {
                Action::ShiftEarlier(Granularity::Week)
            } else {
                Action::ShiftEarlier(Granularity::Day)
            }
        }
        KeyCode::Right => {
            if week {
                Action::ShiftLater(Granularity::Week)
            } else {
                Action::ShiftLater(Granularity::Day)
            }
        }
        KeyCode::Char('+') => Action::ZoomIn,
        KeyCode::Char('-') => Action::ZoomOut,
        KeyCode::Char('=') => Action::Fit,
        KeyCode::Char('a') => Action::Add,
        KeyCode::Char('d') => Action::Delete,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shifted(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Select);
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Action::Select);
    }

    #[test]
    fn test_window_keys() {
        assert_eq!(
            key_to_action(key(KeyCode::Left)),
            Action::ShiftEarlier(Granularity::Day)
        );
        assert_eq!(
            key_to_action(shifted(KeyCode::Right)),
            Action::ShiftLater(Granularity::Week)
        );
        assert_eq!(key_to_action(key(KeyCode::Char('+'))), Action::ZoomIn);
        assert_eq!(key_to_action(key(KeyCode::Char('-'))), Action::ZoomOut);
        assert_eq!(key_to_action(key(KeyCode::Char('='))), Action::Fit);
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
        assert_eq!(key_to_action(key(KeyCode::F(5))), Action::None);
    }

    #[test]
    fn test_control_keys() {
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_s), Action::Save);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c), Action::Quit);
    }
}
