//! Help overlay.
//!
//! Drawn last inside the same `terminal.draw()` closure; `Clear` erases the
//! panels underneath so the modal needs no second draw call.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / k", "Scroll down / up one line"),
            ("g / G", "Jump to top / bottom"),
            ("Ctrl-d / u", "Scroll half page down / up"),
            ("Ctrl-f / b", "Scroll full page down / up"),
            ("H / L", "Move panel focus left / right"),
        ],
    ),
    (
        "Branches",
        &[
            ("Enter / l", "Expand a branch, or select the commit under the cursor"),
            ("c", "Clear the selected commit"),
        ],
    ),
    (
        "Changes",
        &[
            ("{ / }", "Previous / next file change"),
            ("[ / ]", "Previous / next hunk"),
            ("< / >", "Shrink / grow diff panel by 5%"),
        ],
    ),
    (
        "Details",
        &[
            ("1 / 2 / 3", "Explanation / Tests / Impacts"),
            ("t", "Cycle details tab"),
            ("( / )", "Previous / next impact"),
            ("e", "Write edge cases for the current change (Enter sends)"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Open / close this help"),
            ("q / Esc", "Quit (confirms if an edge-case draft is unsent)"),
        ],
    ),
];

/// Renders the help modal scrolled by `help_scroll` rows.
///
/// Skipped below 60 columns, where the centred area would be too small to read.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to close ")
        .border_style(Style::default().fg(theme.border_active));

    let text = help_text(theme);
    let max_scroll = u16::try_from(text.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll.min(max_scroll), 0)),
        overlay_area,
    );
}

fn help_text(theme: &Theme) -> Text<'static> {
    let heading = Style::default().fg(theme.heading).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(theme.commit_id);

    let mut lines = Vec::new();
    for (i, (section, bindings)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*section, heading)));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<12}"), key),
                Span::raw(*action),
            ]));
        }
    }
    Text::from(lines)
}
