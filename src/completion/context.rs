//! Enclosing-block detection for code completion
//!
//! Walks the text before the cursor backward, pairing braces, to find the
//! blocks that are still open at the cursor. Each line is lexed forward on its
//! own so that braces inside strings (`"..."`, `` `...` ``), line comments
//! (`//`, `#`) and single-line `/* */` comments are not counted. A string or
//! `/* */` comment spanning several lines is lexed line by line, so braces on
//! its inner lines do count.
//!
//! Only a `{` preceded by a block header (`prometheus.scrape "s" {`,
//! `endpoint {`) contributes to the chain. Other openers, such as the map in
//! `targets = [{ ... }]` or `expressions = {`, only pair with their closers.
//!
//! The walk is a small state machine:
//!
//! - `DepthZero`: every closer seen so far has been paired; the next header
//!   opener is an enclosing block.
//! - `DepthPositive(n)`: `n` closers are still waiting for their opener.
//! - `ScanningForHeaderAtCurrentDepth`: an unpaired `{` started its own line,
//!   so its header, if any, is on the previous non-blank line.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use ropey::RopeSlice;
use tracing::trace;

/// `identifier.path "optional label"` with nothing else around it.
static BLOCK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([A-Za-z_][A-Za-z0-9_.]*)(?:\s+"(?:[^"\\]|\\.)*")?\s*$"#)
        .expect("block header pattern is valid")
});

/// Identity of the innermost block still open at the end of `prefix`, or
/// `None` at top level.
///
/// Stops at the first unpaired header opener, so the cost depends on the
/// distance to the start of the enclosing block rather than on the size of
/// `prefix`.
pub fn innermost_block(prefix: &str) -> Option<String> {
    BackwardScan::new(str_lines_rev(prefix)).next()
}

/// Identities of all blocks still open at the end of `prefix`, outermost first.
pub fn enclosing_chain(prefix: &str) -> Vec<String> {
    let mut chain: Vec<String> = BackwardScan::new(str_lines_rev(prefix)).collect();
    chain.reverse();
    chain
}

/// [`innermost_block`] over a rope slice, reading only the lines it needs.
///
/// Lines are split the way ropey splits them, which also breaks on lone `\r`
/// and the Unicode line separators.
pub fn innermost_block_in_rope(prefix: RopeSlice<'_>) -> Option<String> {
    BackwardScan::new(rope_lines_rev(prefix)).next()
}

fn str_lines_rev(prefix: &str) -> impl Iterator<Item = Cow<'_, str>> {
    prefix.rsplit('\n').map(Cow::Borrowed)
}

fn rope_lines_rev(prefix: RopeSlice<'_>) -> impl Iterator<Item = Cow<'_, str>> {
    (0..prefix.len_lines()).rev().map(move |index| {
        let line = prefix.line(index);
        let mut end = line.len_chars();
        if end > 0 && line.char(end - 1) == '\n' {
            end -= 1;
        }
        Cow::from(line.slice(..end))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    DepthZero,
    DepthPositive(usize),
    ScanningForHeaderAtCurrentDepth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Code,
    DoubleQuoted,
    Backtick,
    BlockComment,
}

/// Structural braces of a single line.
struct LineScan<'a> {
    line: Cow<'a, str>,
    braces: Vec<(usize, Brace)>,
    /// Byte offset where a trailing line comment starts (or the line length).
    code_end: usize,
}

impl<'a> LineScan<'a> {
    fn new(line: Cow<'a, str>) -> Self {
        let bytes = line.as_bytes();
        let mut braces = Vec::new();
        let mut state = LexState::Code;
        let mut code_end = bytes.len();
        let mut i = 0;

        // Every delimiter is ASCII, so byte indices always land on char boundaries
        while i < bytes.len() {
            let b = bytes[i];
            let next = bytes.get(i + 1).copied();
            match state {
                LexState::Code => match (b, next) {
                    (b'"', _) => state = LexState::DoubleQuoted,
                    (b'`', _) => state = LexState::Backtick,
                    (b'#', _) | (b'/', Some(b'/')) => {
                        code_end = i;
                        break;
                    }
                    (b'/', Some(b'*')) => {
                        state = LexState::BlockComment;
                        i += 1;
                    }
                    (b'{', _) => braces.push((i, Brace::Open)),
                    (b'}', _) => braces.push((i, Brace::Close)),
                    _ => {}
                },
                LexState::DoubleQuoted => match b {
                    b'\\' => i += 1,
                    b'"' => state = LexState::Code,
                    _ => {}
                },
                LexState::Backtick => {
                    if b == b'`' {
                        state = LexState::Code;
                    }
                }
                LexState::BlockComment => {
                    if b == b'*' && next == Some(b'/') {
                        state = LexState::Code;
                        i += 1;
                    }
                }
            }
            i += 1;
        }

        Self {
            line,
            braces,
            code_end,
        }
    }

    fn is_blank(&self) -> bool {
        self.line[..self.code_end].trim().is_empty()
    }

    /// Text between the previous brace on this line (or line start) and brace `k`.
    fn segment_before(&self, k: usize) -> &str {
        let start = match k {
            0 => 0,
            _ => self.braces[k - 1].0 + 1,
        };
        &self.line[start..self.braces[k].0]
    }

    /// Code after the last brace on this line.
    fn tail(&self) -> &str {
        let start = self.braces.last().map_or(0, |(pos, _)| pos + 1);
        &self.line[start..self.code_end]
    }
}

fn header_identity(header: &str) -> Option<String> {
    BLOCK_HEADER
        .captures(header)
        .map(|captures| captures[1].to_string())
}

/// Lazily yields enclosing block identities from innermost to outermost.
///
/// `lines` yields the lines of the prefix last to first, without terminators.
struct BackwardScan<'a, L> {
    lines: L,
    current: Option<LineScan<'a>>,
    /// Braces of `current` not yet visited, counted from the left.
    remaining: usize,
    state: ScanState,
    exhausted: bool,
}

impl<'a, L: Iterator<Item = Cow<'a, str>>> BackwardScan<'a, L> {
    fn new(lines: L) -> Self {
        Self {
            lines,
            current: None,
            remaining: 0,
            state: ScanState::DepthZero,
            exhausted: false,
        }
    }

    fn load_previous_line(&mut self) -> bool {
        match self.lines.next() {
            Some(line) => {
                let line = match line {
                    Cow::Borrowed(raw) => Cow::Borrowed(raw.strip_suffix('\r').unwrap_or(raw)),
                    Cow::Owned(mut raw) => {
                        if raw.ends_with('\r') {
                            raw.pop();
                        }
                        Cow::Owned(raw)
                    }
                };
                let scan = LineScan::new(line);
                self.remaining = scan.braces.len();
                self.current = Some(scan);
                true
            }
            None => {
                self.current = None;
                false
            }
        }
    }
}

impl<'a, L: Iterator<Item = Cow<'a, str>>> Iterator for BackwardScan<'a, L> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.exhausted {
            return None;
        }

        loop {
            if self.remaining == 0 && !self.load_previous_line() {
                // Start of the document; a pending headerless `{` names nothing
                self.exhausted = true;
                return None;
            }
            let Some(line) = self.current.as_ref() else {
                continue;
            };

            if self.state == ScanState::ScanningForHeaderAtCurrentDepth {
                if line.is_blank() {
                    self.remaining = 0;
                    continue;
                }
                // This line's own braces are visited next either way
                self.state = ScanState::DepthZero;
                if let Some(identity) = header_identity(line.tail()) {
                    trace!("Header on previous line resolved to {}", identity);
                    return Some(identity);
                }
                continue;
            }

            if self.remaining == 0 {
                continue;
            }
            self.remaining -= 1;
            let k = self.remaining;
            let brace = line.braces[k].1;

            self.state = match (self.state, brace) {
                (ScanState::DepthZero, Brace::Close) => ScanState::DepthPositive(1),
                (ScanState::DepthPositive(n), Brace::Close) => ScanState::DepthPositive(n + 1),
                (ScanState::DepthPositive(1), Brace::Open) => ScanState::DepthZero,
                (ScanState::DepthPositive(n), Brace::Open) => ScanState::DepthPositive(n - 1),
                (ScanState::DepthZero, Brace::Open) => {
                    let segment = line.segment_before(k);
                    if k == 0 && segment.trim().is_empty() {
                        // `{` opens its line; the header, if any, is further up
                        self.remaining = 0;
                        self.state = ScanState::ScanningForHeaderAtCurrentDepth;
                        continue;
                    }
                    match header_identity(segment) {
                        Some(identity) => return Some(identity),
                        None => {
                            trace!("Skipping unpaired opener without a header: {:?}", segment);
                            ScanState::DepthZero
                        }
                    }
                }
                (ScanState::ScanningForHeaderAtCurrentDepth, _) => ScanState::DepthZero,
            };
        }
    }
}
