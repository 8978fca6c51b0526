//! Responsive 3-panel layout for branchlens.
//!
//! Pure layout arithmetic, recomputed on every draw so it always reflects the
//! current terminal size.
//!
//! At `>= 120` columns all three panels are visible with widths from
//! `AppState.left_pct / center_pct / right_pct`. Below that both side panels
//! collapse and the diff fills the width.
//!
//! `Spacing::Overlap(1)` with `MergeStrategy::Fuzzy` lets adjacent borders
//! share a column and merge their junction characters.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode, StatusKind};
use crate::theme::Theme;

/// Terminal width below which the side panels collapse.
pub const COLLAPSE_WIDTH: u16 = 120;

/// Returns `[left, center, right, status_bar]` for the current frame.
pub fn compute_layout(area: Rect, state: &AppState) -> [Rect; 4] {
    let [main_area, status_bar] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let horizontal = if area.width >= COLLAPSE_WIDTH {
        Layout::horizontal([
            Constraint::Percentage(state.left_pct),
            Constraint::Percentage(state.center_pct),
            Constraint::Percentage(state.right_pct),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([Constraint::Length(0), Constraint::Fill(1), Constraint::Length(0)])
            .spacing(Spacing::Overlap(1))
    };

    let [left, center, right] = main_area.layout(&horizontal);
    [left, center, right, status_bar]
}

/// Strips the 1-cell border.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered panel block; thick and highlighted when focused.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// One-row status bar: mode, busy spinner, selection, last message.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::ConfirmQuit | Mode::HelpOverlay => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    if state.is_busy() {
        spans.push(Span::raw(format!(" {} loading ", state.spinner())));
    }

    let store = state.session.store();
    if let Some(commit) = store.selected_commit_id() {
        let selection = match store.current_change_id() {
            Some(change) => format!(" {commit} › {change} "),
            None => format!(" {commit} "),
        };
        spans.push(Span::styled(selection, Style::default().fg(theme.commit_id)));
    }

    if let Some(status) = &state.status {
        let fg = match status.kind {
            StatusKind::Ok => theme.status_ok,
            StatusKind::Error => theme.status_error,
            StatusKind::Info => theme.status_bar_fg,
        };
        spans.push(Span::styled(format!(" {} ", status.text), Style::default().fg(fg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
