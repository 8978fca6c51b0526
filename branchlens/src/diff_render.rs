//! Turns parsed hunks into styled lines for the diff panel.
//!
//! Lines are rendered once per change and cached in `AppState`, so each
//! frame only clones the visible window.

use branchlens_core::diff::{DiffLine, Hunk};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use similar::{ChangeTag, TextDiff};

use crate::highlight::Tokenizer;
use crate::theme::Theme;

/// Styled lines plus the positions of hunk headers within them.
#[derive(Debug, Default, Clone)]
pub struct RenderedDiff {
    pub lines: Vec<Line<'static>>,
    /// Indices into `lines` where hunk headers appear, for `[` / `]`.
    pub hunk_offsets: Vec<usize>,
}

/// Renders `hunks` with origin colouring, syntax highlighting, and word-level
/// emphasis on adjacent removed/added pairs.
pub fn render_hunks(hunks: &[Hunk], tokenizer: &mut dyn Tokenizer, theme: &Theme) -> RenderedDiff {
    let mut out = RenderedDiff::default();

    for hunk in hunks {
        if !hunk.header.is_empty() {
            out.hunk_offsets.push(out.lines.len());
            out.lines.push(Line::from(Span::styled(
                hunk.header.trim_end().to_owned(),
                Style::default().fg(theme.diff_hunk_header),
            )));
        } else {
            out.hunk_offsets.push(out.lines.len());
        }

        let mut pending_removed: Option<&DiffLine> = None;
        for line in &hunk.lines {
            match line.origin {
                '-' => {
                    if let Some(prev) = pending_removed.take() {
                        out.lines.push(plain_line(prev, tokenizer, theme));
                    }
                    pending_removed = Some(line);
                }
                '+' => match pending_removed.take() {
                    Some(removed) => {
                        let (old, new) = word_diff_lines(removed, line, theme);
                        out.lines.push(old);
                        out.lines.push(new);
                    }
                    None => out.lines.push(plain_line(line, tokenizer, theme)),
                },
                _ => {
                    if let Some(prev) = pending_removed.take() {
                        out.lines.push(plain_line(prev, tokenizer, theme));
                    }
                    out.lines.push(plain_line(line, tokenizer, theme));
                }
            }
        }
        if let Some(prev) = pending_removed.take() {
            out.lines.push(plain_line(prev, tokenizer, theme));
        }
    }

    out
}

/// Gutter with old/new line numbers and the origin marker.
fn gutter(line: &DiffLine, theme: &Theme) -> Vec<Span<'static>> {
    let num = |n: Option<u32>| n.map_or_else(|| "    ".to_owned(), |n| format!("{n:>4}"));
    let origin_color = origin_color(line.origin, theme);
    vec![
        Span::styled(
            format!("{} {} ", num(line.old_lineno), num(line.new_lineno)),
            Style::default().fg(theme.diff_line_number),
        ),
        Span::styled(format!("{} ", line.origin), Style::default().fg(origin_color)),
    ]
}

fn origin_color(origin: char, theme: &Theme) -> ratatui::style::Color {
    match origin {
        '+' => theme.diff_added,
        '-' => theme.diff_removed,
        _ => theme.diff_context,
    }
}

/// A syntax-highlighted line without word emphasis.
fn plain_line(line: &DiffLine, tokenizer: &mut dyn Tokenizer, theme: &Theme) -> Line<'static> {
    let mut spans = gutter(line, theme);
    spans.extend(tokenizer.tokenize(&line.content).into_iter().map(|t| t.into_span()));
    Line::from(spans)
}

/// Word-level diff of a removed/added pair. Changed words are bold; the rest
/// keeps the line's base colour.
fn word_diff_lines(old: &DiffLine, new: &DiffLine, theme: &Theme) -> (Line<'static>, Line<'static>) {
    let diff = TextDiff::from_words(old.content.as_str(), new.content.as_str());
    let mut old_spans = gutter(old, theme);
    let mut new_spans = gutter(new, theme);

    let removed = Style::default().fg(theme.diff_removed);
    let added = Style::default().fg(theme.diff_added);

    for op in diff.ops() {
        for change in diff.iter_inline_changes(op) {
            for (emphasized, value) in change.iter_strings_lossy() {
                let text = value.into_owned();
                match change.tag() {
                    ChangeTag::Delete => {
                        let style = if emphasized { removed.add_modifier(Modifier::BOLD) } else { removed };
                        old_spans.push(Span::styled(text, style));
                    }
                    ChangeTag::Insert => {
                        let style = if emphasized { added.add_modifier(Modifier::BOLD) } else { added };
                        new_spans.push(Span::styled(text, style));
                    }
                    ChangeTag::Equal => {
                        old_spans.push(Span::styled(text.clone(), removed));
                        new_spans.push(Span::styled(text, added));
                    }
                }
            }
        }
    }
    (Line::from(old_spans), Line::from(new_spans))
}
