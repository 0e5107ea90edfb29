//! Balanced argument extraction for class-merging helper calls.
//!
//! Finds `cn(...)`, `clsx(...)` and `classnames(...)` invocations and walks
//! forward from the opening parenthesis to its partner, skipping quoted
//! regions and comments so that parentheses inside them do not count.

use crate::comments::CommentMap;
use crate::escape::QuoteTracker;

/// Recognized class-merging function names.
pub const MERGE_FUNCTIONS: [&str; 3] = ["cn", "clsx", "classnames"];

/// One balanced invocation of a merge function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// The function name that matched
    pub name: &'static str,
    /// Text strictly between the parentheses
    pub args: &'a str,
    /// Offset of `args[0]` in the document
    pub args_start: usize,
    /// Offset of the first byte of the function name
    pub call_start: usize,
    /// Offset one past the closing parenthesis
    pub call_end: usize,
}

impl CallSite<'_> {
    /// Returns true if a cursor at `offset` sits within the call, both ends
    /// inclusive.
    pub fn encloses(&self, offset: usize) -> bool {
        self.call_start <= offset && offset <= self.call_end
    }
}

/// Finds every balanced merge-function call in `text`, sorted by start offset.
///
/// Calls whose name starts inside a comment are skipped. A call with no
/// matching closing parenthesis is dropped.
pub fn find_calls<'a>(text: &'a str, comments: &CommentMap) -> Vec<CallSite<'a>> {
    let bytes = text.as_bytes();
    let mut calls = Vec::new();

    for name in MERGE_FUNCTIONS {
        for (call_start, _) in text.match_indices(name) {
            if comments.contains(call_start) || !is_identifier_start(bytes, call_start) {
                continue;
            }
            let Some(open) = open_paren_after(bytes, call_start + name.len()) else {
                continue;
            };
            let Some(close) = matching_paren(bytes, open, comments) else {
                tracing::debug!(name, offset = call_start, "dropping unterminated call");
                continue;
            };
            calls.push(CallSite {
                name,
                args: &text[open + 1..close],
                args_start: open + 1,
                call_start,
                call_end: close + 1,
            });
        }
    }

    calls.sort_by_key(|call| call.call_start);
    calls
}

/// Returns the offset of the `)` matching the `(` at `open`.
pub fn matching_paren(bytes: &[u8], open: usize, comments: &CommentMap) -> Option<usize> {
    let mut quotes = QuoteTracker::new();
    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if !quotes.is_quoted() {
            if let Some(comment) = comments.range_at(i) {
                i = comment.end;
                continue;
            }
        }
        let delimiter = quotes.step(bytes, i);
        if !delimiter && !quotes.is_quoted() {
            match bytes[i] {
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    None
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte >= 0x80
}

/// The name must not continue an identifier to its left.
fn is_identifier_start(bytes: &[u8], idx: usize) -> bool {
    idx == 0 || !is_identifier_byte(bytes[idx - 1])
}

/// Skips whitespace after the name and expects `(`.
fn open_paren_after(bytes: &[u8], mut idx: usize) -> Option<usize> {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    (bytes.get(idx) == Some(&b'(')).then_some(idx)
}
