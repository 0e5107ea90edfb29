//! Comment detection.
//!
//! A single left-to-right pass classifies the document into code, quoted
//! regions and comments. Quoted regions are skipped so that `//` inside a
//! string is not a comment and a quote inside a comment does not open a
//! string. The resulting ranges are sorted and disjoint, which lets
//! [`CommentMap::contains`] answer membership queries with a binary search.
//!
//! Recognized comment forms:
//! - `// ...` up to the next newline (not when directly preceded by `:`, as in
//!   `https://`)
//! - `/* ... */`
//! - `<!-- ... -->`
//! - `# ...` up to the next newline, only when the `#` is the first
//!   non-blank character on its line
//!
//! An unterminated comment runs to the end of the document.

use crate::escape::{Quote, is_escaped};
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    Quoted(Quote),
    LineComment,
    BlockComment,
    MarkupComment,
}

/// Sorted, non-overlapping comment ranges of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    ranges: Vec<Span>,
}

impl CommentMap {
    /// Builds the comment map for `text`.
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let len = bytes.len();
        let mut ranges = Vec::new();
        let mut state = ScanState::Code;
        let mut start = 0;
        let mut i = 0;

        while i < len {
            let byte = bytes[i];
            match state {
                ScanState::Code => {
                    if let Some(quote) = Quote::from_byte(byte) {
                        if !is_escaped(bytes, i) {
                            state = ScanState::Quoted(quote);
                        }
                        i += 1;
                        continue;
                    }
                    if let Some((next, opener_len)) = comment_opener(bytes, i) {
                        state = next;
                        start = i;
                        i += opener_len;
                        continue;
                    }
                    i += 1;
                }
                ScanState::Quoted(quote) => {
                    if byte == quote.byte() && !is_escaped(bytes, i) {
                        state = ScanState::Code;
                    }
                    i += 1;
                }
                ScanState::LineComment => {
                    if byte == b'\n' {
                        ranges.push(Span::new(start, i));
                        state = ScanState::Code;
                    }
                    i += 1;
                }
                ScanState::BlockComment => {
                    if bytes[i..].starts_with(b"*/") {
                        ranges.push(Span::new(start, i + 2));
                        state = ScanState::Code;
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                ScanState::MarkupComment => {
                    if bytes[i..].starts_with(b"-->") {
                        ranges.push(Span::new(start, i + 3));
                        state = ScanState::Code;
                        i += 3;
                    } else {
                        i += 1;
                    }
                }
            }
        }

        if matches!(
            state,
            ScanState::LineComment | ScanState::BlockComment | ScanState::MarkupComment
        ) {
            ranges.push(Span::new(start, len));
        }

        tracing::trace!(comments = ranges.len(), "built comment map");
        Self { ranges }
    }

    /// The comment ranges, sorted by start offset.
    pub fn ranges(&self) -> &[Span] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns true if `offset` lies inside a comment. Range ends are exclusive.
    pub fn contains(&self, offset: usize) -> bool {
        self.range_at(offset).is_some()
    }

    /// Returns the comment range containing `offset`, if any.
    pub fn range_at(&self, offset: usize) -> Option<Span> {
        let idx = self.ranges.partition_point(|range| range.end <= offset);
        self.ranges
            .get(idx)
            .copied()
            .filter(|range| range.start <= offset)
    }
}

/// Checks whether a comment starts at `i` (in code state). Returns the comment
/// state to enter and the opener length.
fn comment_opener(bytes: &[u8], i: usize) -> Option<(ScanState, usize)> {
    let rest = &bytes[i..];
    if rest.starts_with(b"//") {
        let after_scheme = i > 0 && bytes[i - 1] == b':';
        return (!after_scheme).then_some((ScanState::LineComment, 2));
    }
    if rest.starts_with(b"/*") {
        return Some((ScanState::BlockComment, 2));
    }
    if rest.starts_with(b"<!--") {
        return Some((ScanState::MarkupComment, 4));
    }
    if rest[0] == b'#' && starts_line(bytes, i) {
        return Some((ScanState::LineComment, 1));
    }
    None
}

/// True if only spaces or tabs separate `i` from the start of its line.
fn starts_line(bytes: &[u8], i: usize) -> bool {
    bytes[..i]
        .iter()
        .rev()
        .take_while(|&&b| b != b'\n')
        .all(|&b| b == b' ' || b == b'\t')
}
