//! Branch tree panel.
//!
//! Branch headers with a ▸/▾ marker; commits of the expanded branch are
//! listed under it with short id, message, and author. The selected commit
//! is marked with `●`.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use branchlens_core::types::{Branch, Commit};

use crate::app::{AppState, PanelFocus, TreeRow};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

pub fn render_branch_tree(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Branches;
    let title = if state.branches.is_empty() {
        "Branches".to_owned()
    } else {
        format!("Branches ({})", state.branches.len())
    };
    let block = panel_block(title, is_focused, theme);

    let selected_commit = state.session.store().selected_commit_id();
    let items: Vec<ListItem> = if state.branches.is_empty() {
        let msg = if state.branches_loading { "Loading..." } else { "No branches" };
        vec![ListItem::new(Line::raw(msg))]
    } else {
        state
            .tree_rows()
            .into_iter()
            .filter_map(|row| match row {
                TreeRow::Branch(b) => {
                    let branch = state.branches.get(b)?;
                    Some(branch_item(branch, state.expanded_branch == Some(b), theme))
                }
                TreeRow::Commit { branch, commit } => {
                    let commit = state.commit_at(branch, commit)?;
                    let selected = selected_commit == Some(commit.id.as_str());
                    Some(commit_item(commit, selected, theme))
                }
            })
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active).add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(list, area, &mut state.tree_state);
}

fn branch_item(branch: &Branch, expanded: bool, theme: &Theme) -> ListItem<'static> {
    let marker = if expanded { "▾ " } else { "▸ " };
    let count = Span::styled(
        format!("  {}", branch.commits.len()),
        Style::default().fg(theme.muted),
    );
    ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::styled(branch.name.clone(), Style::default().fg(theme.branch).add_modifier(Modifier::BOLD)),
        count,
    ]))
}

fn commit_item(commit: &Commit, selected: bool, theme: &Theme) -> ListItem<'static> {
    let mark = if selected { "  ● " } else { "    " };
    let header = Line::from(vec![
        Span::raw(mark),
        Span::styled(commit.short_id().to_owned(), Style::default().fg(theme.commit_id)),
        Span::raw(" "),
        Span::raw(commit.message.clone()),
    ]);
    let byline = Line::from(Span::styled(
        format!("      {} · {}", commit.author, commit.date.format("%Y-%m-%d %H:%M")),
        Style::default().fg(theme.muted),
    ));
    ListItem::new(vec![header, byline])
}
