//! Unified-diff blob parsing.
//!
//! File changes carry their diff as a single text blob. [`parse_hunks`] turns
//! it into owned hunks with per-line numbering so the UI can highlight and
//! navigate without re-parsing on every frame.

/// One line of a hunk.
///
/// `origin` follows git conventions: `'+'` added, `'-'` removed, `' '` context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub origin: char,
    /// Line text without the origin prefix or trailing newline.
    pub content: String,
    pub old_lineno: Option<u32>,
    pub new_lineno: Option<u32>,
}

/// One `@@` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// The raw `@@ -a,b +c,d @@` header, empty for a headerless hunk.
    pub header: String,
    pub old_start: u32,
    pub new_start: u32,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    fn headerless() -> Self {
        Self { header: String::new(), old_start: 1, new_start: 1, lines: Vec::new() }
    }
}

/// Returns the counter's value and advances it. Past `u32::MAX` the counter
/// is exhausted and every later line is unnumbered.
fn take_lineno(counter: &mut Option<u32>) -> Option<u32> {
    let n = (*counter)?;
    *counter = n.checked_add(1);
    Some(n)
}

/// Splits `blob` into hunks.
///
/// Lines before the first header form a headerless hunk starting at line 1.
/// Lines without a `+`/`-`/space prefix are treated as context. `\ No newline
/// at end of file` markers are dropped. An empty blob yields no hunks.
/// Line numbers that would exceed `u32::MAX` are reported as `None`.
pub fn parse_hunks(blob: &str) -> Vec<Hunk> {
    let mut hunks: Vec<Hunk> = Vec::new();
    let mut old_line = Some(1u32);
    let mut new_line = Some(1u32);

    for raw in blob.lines() {
        if raw.starts_with("@@") {
            let (old_start, new_start) = parse_header(raw).unwrap_or((
                old_line.unwrap_or(u32::MAX),
                new_line.unwrap_or(u32::MAX),
            ));
            old_line = Some(old_start);
            new_line = Some(new_start);
            hunks.push(Hunk { header: raw.to_owned(), old_start, new_start, lines: Vec::new() });
            continue;
        }
        if raw.starts_with('\\') {
            continue;
        }

        if hunks.is_empty() {
            hunks.push(Hunk::headerless());
        }
        let Some(hunk) = hunks.last_mut() else { continue };

        let (origin, content) = match raw.chars().next() {
            Some(c @ ('+' | '-' | ' ')) => (c, &raw[1..]),
            _ => (' ', raw),
        };
        let (old_lineno, new_lineno) = match origin {
            '+' => (None, take_lineno(&mut new_line)),
            '-' => (take_lineno(&mut old_line), None),
            _ => (take_lineno(&mut old_line), take_lineno(&mut new_line)),
        };
        hunk.lines.push(DiffLine { origin, content: content.to_owned(), old_lineno, new_lineno });
    }

    hunks
}

/// Extracts `(old_start, new_start)` from `@@ -a[,b] +c[,d] @@`.
fn parse_header(header: &str) -> Option<(u32, u32)> {
    let mut parts = header.trim_start_matches('@').split_whitespace();
    let old = parts.next()?.strip_prefix('-')?;
    let new = parts.next()?.strip_prefix('+')?;
    let start = |range: &str| range.split(',').next()?.parse::<u32>().ok();
    Some((start(old)?, start(new)?))
}
