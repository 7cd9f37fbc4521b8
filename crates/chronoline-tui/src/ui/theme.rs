//! Theme and styling definitions for the chronoline TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(28, 30, 38);
    pub const FG: Color = Color::Rgb(222, 224, 232);
    pub const DIM: Color = Color::Rgb(135, 140, 158);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(125, 170, 250);

    // Entry classes
    pub const EVENT: Color = Color::Rgb(128, 182, 213);
    pub const MILESTONE: Color = Color::Rgb(64, 146, 191);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(128, 215, 135);
    pub const WARNING: Color = Color::Rgb(238, 200, 105);
    pub const ERROR: Color = Color::Rgb(238, 105, 105);

    // Chrome
    pub const BORDER: Color = Color::Rgb(80, 82, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(125, 170, 250);
    pub const STATUS_BG: Color = Color::Rgb(44, 46, 58);
    pub const STATUS_KEY_BG: Color = Color::Rgb(68, 88, 136);
}

/// Glyphs used on the timeline and in status lines.
pub struct Symbols;

impl Symbols {
    pub const EVENT: &'static str = "\u{25cf}"; // ●
    pub const MILESTONE: &'static str = "\u{25c6}"; // ◆
    pub const OVERFLOW_START: &'static str = "\u{25c0}"; // ◀
    pub const OVERFLOW_END: &'static str = "\u{25b6}"; // ▶
    pub const STEP_DONE: &'static str = "\u{2713}"; // ✓
    pub const FOCUS: &'static str = "\u{203a}"; // ›
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Regular event marker.
    pub fn event() -> Style {
        Style::default().fg(Palette::EVENT).bg(Palette::BG)
    }

    /// Milestone marker.
    pub fn milestone() -> Style {
        Style::default()
            .fg(Palette::MILESTONE)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Success status.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS).bg(Palette::BG)
    }

    /// Warning status.
    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::BG)
    }

    /// Error / validation text.
    pub fn error() -> Style {
        Style::default().fg(Palette::ERROR).bg(Palette::BG)
    }

    /// Pane and overlay titles.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style for the status bar.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label on the status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}
