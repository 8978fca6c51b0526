//! Diff panel.
//!
//! The title carries the change pager: `‹ i/n › path [kind]`. The body is a
//! virtual-scrolled `List`: only `lines[scroll..scroll + height]` become
//! `ListItem`s each frame.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_diff(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Diff;
    let block = panel_block(pager_title(state, theme), is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.diff.lines.is_empty() {
        let msg = placeholder(state);
        frame.render_widget(List::new(vec![ListItem::new(Line::raw(msg))]), inner);
        return;
    }

    let total = state.diff.lines.len();
    let start = state.diff_scroll.min(total.saturating_sub(1));
    let end = (start + inner.height as usize).min(total);
    let items: Vec<ListItem> =
        state.diff.lines[start..end].iter().map(|l| ListItem::new(l.clone())).collect();
    frame.render_widget(List::new(items), inner);
}

fn placeholder(state: &AppState) -> &'static str {
    let store = state.session.store();
    if store.selected_commit_id().is_none() {
        "Select a commit to see its changes."
    } else if store.is_loading_changes() {
        "Loading changes..."
    } else if store.changes().is_empty() {
        "No file changes in this commit."
    } else {
        "Empty diff."
    }
}

fn pager_title(state: &AppState, theme: &Theme) -> Line<'static> {
    let store = state.session.store();
    let Some(change) = store.current_change() else {
        return Line::from(" Diff ");
    };
    let pager = &state.change_pager;
    let arrow = |enabled: bool, glyph: &'static str| {
        let fg = if enabled { theme.border_active } else { theme.muted };
        Span::styled(glyph, Style::default().fg(fg))
    };
    Line::from(vec![
        Span::raw(" "),
        arrow(!pager.is_first(), "‹"),
        Span::raw(format!(" {} ", pager.label())),
        arrow(!pager.is_last(), "›"),
        Span::raw(format!(" {} ", change.file_path)),
        Span::styled(format!("[{}] ", change.kind), Style::default().fg(theme.change_kind(change.kind))),
    ])
}
