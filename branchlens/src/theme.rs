//! Color theme system for branchlens.
//!
//! - `dark` uses ANSI 16 colours and works on any terminal.
//! - `catppuccin_mocha` uses the Catppuccin Mocha palette and needs truecolor.

use branchlens_core::types::{ChangeKind, Severity};
use ratatui::style::Color;

/// All colour values used across the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Panel borders
    pub border_active: Color,
    pub border_inactive: Color,

    // Diff view
    pub diff_added: Color,
    pub diff_removed: Color,
    pub diff_context: Color,
    pub diff_hunk_header: Color,
    pub diff_line_number: Color,

    // Change kinds
    pub change_added: Color,
    pub change_deleted: Color,
    pub change_modified: Color,

    // Impact severity badges
    pub severity_high: Color,
    pub severity_medium: Color,
    pub severity_low: Color,

    // Branch tree and details
    pub branch: Color,
    pub commit_id: Color,
    pub muted: Color,
    pub heading: Color,
    pub tab_active: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub status_mode_normal: Color,
    pub status_mode_insert: Color,
    pub status_error: Color,
    pub status_ok: Color,

    pub background: Color,
}

impl Theme {
    /// ANSI 16 colours; safe default for unknown terminals.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,
            diff_hunk_header: Color::Cyan,
            diff_line_number: Color::DarkGray,

            change_added: Color::Green,
            change_deleted: Color::Red,
            change_modified: Color::Yellow,

            severity_high: Color::Red,
            severity_medium: Color::Yellow,
            severity_low: Color::Blue,

            branch: Color::Magenta,
            commit_id: Color::Yellow,
            muted: Color::DarkGray,
            heading: Color::Cyan,
            tab_active: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            status_error: Color::Red,
            status_ok: Color::Green,

            background: Color::Reset,
        }
    }

    /// Catppuccin Mocha in RGB.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4
        let peach = Color::Rgb(250, 179, 135);    // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            diff_added: green,
            diff_removed: red,
            diff_context: text,
            diff_hunk_header: teal,
            diff_line_number: overlay1,

            change_added: green,
            change_deleted: red,
            change_modified: yellow,

            severity_high: red,
            severity_medium: peach,
            severity_low: blue,

            branch: mauve,
            commit_id: peach,
            muted: overlay1,
            heading: teal,
            tab_active: lavender,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            status_error: red,
            status_ok: green,

            background: base,
        }
    }

    /// Resolves a config name. Unknown names fall back to `dark()` with a warning.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }

    pub fn change_kind(&self, kind: ChangeKind) -> Color {
        match kind {
            ChangeKind::Added => self.change_added,
            ChangeKind::Deleted => self.change_deleted,
            ChangeKind::Modified => self.change_modified,
        }
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::High => self.severity_high,
            Severity::Medium => self.severity_medium,
            Severity::Low => self.severity_low,
        }
    }
}
