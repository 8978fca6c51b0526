//! Details panel: Explanation, Tests, and Impacts tabs for the current change.
//!
//! The Tests tab also hosts the edge-case input line; the Impacts tab shows
//! one impact at a time behind its own pager.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Tabs, Wrap},
};

use branchlens_core::types::{Explanation, Impact, UnitTest};

use crate::app::{AppState, DetailsTab, Mode, PanelFocus};
use crate::highlight::{file_ext, tokenizer_for_extension};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

pub fn render_details(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Details;
    frame.render_widget(panel_block(" Details ", is_focused, theme), area);

    let inner = inner_rect(area);
    let input_height = if state.details_tab == DetailsTab::Tests { 2 } else { 0 };
    let [tabs_area, body_area, input_area] = inner.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(input_height),
    ]));
    state.details_viewport_height = body_area.height;

    let titles = DetailsTab::ALL.iter().map(|t| {
        let count = match t {
            DetailsTab::Explanation => None,
            DetailsTab::Tests => Some(state.session.store().unit_tests().len()),
            DetailsTab::Impacts => Some(state.session.store().impacts().len()),
        };
        match count {
            Some(n) if n > 0 => format!("{} ({n})", t.title()),
            _ => t.title().to_owned(),
        }
    });
    let tabs = Tabs::new(titles)
        .select(state.details_tab.index())
        .style(Style::default().fg(theme.muted))
        .highlight_style(Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let body = body_text(state, theme);
    let max_scroll = u16::try_from(body.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    state.details_scroll = state.details_scroll.min(max_scroll);
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: false }).scroll((state.details_scroll, 0)),
        body_area,
    );

    if input_height > 0 {
        frame.render_widget(edge_case_input(state, theme), input_area);
    }
}

fn body_text(state: &AppState, theme: &Theme) -> Text<'static> {
    let store = state.session.store();
    if store.is_loading_changes() {
        return muted_text("Loading changes...", theme);
    }
    if store.current_change_id().is_none() {
        return muted_text("No change selected.", theme);
    }
    let loading = store.is_loading_details();
    match state.details_tab {
        DetailsTab::Explanation => match store.explanation() {
            Some(explanation) => explanation_text(explanation, theme),
            None if loading => muted_text("Loading explanation...", theme),
            None => muted_text("No explanation for this change.", theme),
        },
        DetailsTab::Tests => match store.unit_tests() {
            [] if loading => muted_text("Loading tests...", theme),
            [] => muted_text("No generated tests for this change.", theme),
            tests => tests_text(tests, theme),
        },
        DetailsTab::Impacts => match store.impacts().get(state.impact_pager.index()) {
            Some(impact) => impact_text(impact, &state.impact_pager.label(), theme),
            None if loading => muted_text("Loading impacts...", theme),
            None => muted_text("No impacts recorded for this change.", theme),
        },
    }
}

fn muted_text(msg: &'static str, theme: &Theme) -> Text<'static> {
    Text::from(Line::from(Span::styled(msg, Style::default().fg(theme.muted))))
}

fn heading(label: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        label.to_owned(),
        Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
    ))
}

fn paragraph_lines(body: &str) -> impl Iterator<Item = Line<'static>> + '_ {
    body.lines().map(|l| Line::from(l.to_owned()))
}

fn explanation_text(explanation: &Explanation, theme: &Theme) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            explanation.short_description.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        heading("Feature", theme),
        Line::from(explanation.feature_context.clone()),
        Line::default(),
        heading("Technical details", theme),
    ];
    lines.extend(paragraph_lines(&explanation.technical_details));
    lines.push(Line::default());
    lines.push(heading("Impact", theme));
    lines.extend(paragraph_lines(&explanation.impact));
    if !explanation.related_changes.is_empty() {
        lines.push(Line::default());
        lines.push(heading("Related changes", theme));
        lines.push(Line::from(Span::styled(
            explanation.related_changes.join(", "),
            Style::default().fg(theme.commit_id),
        )));
    }
    Text::from(lines)
}

fn code_lines(code: &str, ext: &str) -> Vec<Line<'static>> {
    let mut tokenizer = tokenizer_for_extension(ext);
    code.lines()
        .map(|line| {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(tokenizer.tokenize(line).into_iter().map(|t| t.into_span()));
            Line::from(spans)
        })
        .collect()
}

fn tests_text(tests: &[UnitTest], theme: &Theme) -> Text<'static> {
    let mut lines = Vec::new();
    for test in tests {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{} · {}] ", test.kind, test.framework),
                Style::default().fg(theme.muted),
            ),
            Span::styled(test.description.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.extend(code_lines(&test.source, test.framework.source_extension()));
        lines.push(Line::default());
    }
    Text::from(lines)
}

fn impact_text(impact: &Impact, position: &str, theme: &Theme) -> Text<'static> {
    let severity = theme.severity(impact.severity);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("‹ {position} › "), Style::default().fg(theme.muted)),
            Span::styled(
                format!("[{}]", impact.severity.to_string().to_uppercase()),
                Style::default().fg(severity).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(impact.file_path.clone(), Style::default().fg(theme.commit_id)),
        ]),
        Line::default(),
    ];
    lines.extend(paragraph_lines(&impact.description));
    lines.push(Line::default());
    lines.extend(code_lines(&impact.code, file_ext(&impact.file_path)));
    Text::from(lines)
}

fn edge_case_input(state: &AppState, theme: &Theme) -> Paragraph<'static> {
    let editing = state.mode == Mode::Insert;
    let hint = if state.submitting {
        "sending..."
    } else if editing {
        "Enter to send, Esc to stop editing"
    } else {
        "e to add edge cases"
    };
    let cursor = if editing { "█" } else { "" };
    let prompt_style = if editing {
        Style::default().fg(theme.status_mode_insert)
    } else {
        Style::default().fg(theme.muted)
    };
    Paragraph::new(vec![
        Line::from(Span::styled(format!("Edge cases · {hint}"), Style::default().fg(theme.muted))),
        Line::from(vec![
            Span::styled("> ", prompt_style),
            Span::raw(format!("{}{cursor}", state.draft)),
        ]),
    ])
}
