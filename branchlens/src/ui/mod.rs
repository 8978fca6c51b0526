//! UI rendering for branchlens.
//!
//! `render()` is the single entry point, called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own module.

mod branch_tree;
mod details;
mod diff_view;
mod help;
pub mod keybindings;
mod layout;

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame.
///
/// Viewport heights and panel rects are written back into `state` before the
/// panels draw, so paging and mouse focus on the next event use this frame's
/// geometry.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [left, center, right, status_bar] = compute_layout(frame.area(), state);

    state.tree_viewport_height = inner_rect(left).height;
    state.diff_viewport_height = inner_rect(center).height;
    state.panel_rects = [left, center, right];

    state.ensure_diff(theme);

    if left.width > 0 {
        branch_tree::render_branch_tree(frame, left, state, theme);
    }
    diff_view::render_diff(frame, center, state, theme);
    if right.width > 0 {
        details::render_details(frame, right, state, theme);
    }
    render_status_bar(frame, status_bar, state, theme);

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::ConfirmQuit => render_confirm_quit(frame, theme),
        Mode::Normal | Mode::Insert => {}
    }
}

fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = frame.area().centered(Constraint::Length(44), Constraint::Length(4));
    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .title(" Quit? ")
        .border_style(Style::default().fg(theme.status_error));
    frame.render_widget(
        Paragraph::new(vec![
            Line::from("The edge-case draft has not been sent."),
            Line::styled("y quit · n stay", Style::default().add_modifier(Modifier::BOLD)),
        ])
        .block(block)
        .centered(),
        area,
    );
}
