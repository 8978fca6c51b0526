//! Syntax highlighting behind a small tokenizer interface.
//!
//! The diff view, test sources, and impact snippets only need "text in,
//! styled tokens out". [`Tokenizer`] is that seam; [`SyntectTokenizer`]
//! implements it with syntect, [`PlainTokenizer`] is the fallback.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const SYNTECT_THEME: &str = "base16-ocean.dark";

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub style: Style,
}

impl Token {
    pub fn into_span(self) -> Span<'static> {
        Span::styled(self.text, self.style)
    }
}

/// Splits one line of source into styled tokens.
///
/// Implementations may keep state between calls (multi-line strings and
/// comments), so feed lines of one file in order.
pub trait Tokenizer {
    fn tokenize(&mut self, line: &str) -> Vec<Token>;
}

/// One unstyled token per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&mut self, line: &str) -> Vec<Token> {
        vec![Token { text: line.to_owned(), style: Style::default() }]
    }
}

/// syntect-backed tokenizer for one file's syntax.
pub struct SyntectTokenizer {
    highlighter: HighlightLines<'static>,
}

impl SyntectTokenizer {
    /// Picks a syntax from the extension; plain text when unknown.
    /// Returns `None` only if no syntect theme is available.
    pub fn for_extension(ext: &str) -> Option<Self> {
        let theme = TS.themes.get(SYNTECT_THEME).or_else(|| TS.themes.values().next())?;
        let syntax = PS.find_syntax_by_extension(ext).unwrap_or_else(|| PS.find_syntax_plain_text());
        Some(Self { highlighter: HighlightLines::new(syntax, theme) })
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize(&mut self, line: &str) -> Vec<Token> {
        let ranges = self.highlighter.highlight_line(line, &PS).unwrap_or_default();
        let tokens: Vec<Token> = ranges
            .into_iter()
            .map(|(style, text)| Token { text: text.to_owned(), style: convert_style(style) })
            .collect();
        if tokens.is_empty() {
            PlainTokenizer.tokenize(line)
        } else {
            tokens
        }
    }
}

/// Best tokenizer for `path`: syntect when available, plain otherwise.
pub fn tokenizer_for_path(path: &str) -> Box<dyn Tokenizer> {
    tokenizer_for_extension(file_ext(path))
}

pub fn tokenizer_for_extension(ext: &str) -> Box<dyn Tokenizer> {
    match SyntectTokenizer::for_extension(ext) {
        Some(t) => Box::new(t),
        None => Box::new(PlainTokenizer),
    }
}

/// Forces the lazily loaded syntax and theme sets.
pub fn warm_up() {
    let _ = &*PS;
    let _ = &*TS;
}

/// Extension of a repository-relative path, "txt" when it has none.
pub fn file_ext(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "txt",
    }
}

/// Rebuilds a syntect style as a ratatui style. Only the foreground is kept;
/// the diff view owns backgrounds.
fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Style::default();
    if fg.a > 0 {
        out = out.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}
