//! Locating class strings in a document.
//!
//! Two producers feed the pipeline: `class="..."` style attributes, and the
//! string or template literals passed to a merge-function call.

use crate::calls::{CallSite, find_calls};
use crate::comments::CommentMap;
use crate::escape::{Quote, is_escaped};
use crate::span::Span;

/// Recognized class attribute names.
pub const CLASS_ATTRIBUTES: [&str; 2] = ["className", "class"];

/// Where a candidate was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// The value of a class attribute
    Attribute,
    /// A literal inside a merge-function call
    FunctionArgs,
}

/// A slice of the document believed to hold a whitespace-separated class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Text between the delimiters
    pub text: &'a str,
    /// Offset of `text[0]` in the document
    pub base_offset: usize,
    pub kind: CandidateKind,
    /// The delimiter that enclosed `text`
    pub quote: Quote,
}

impl Candidate<'_> {
    /// Template literal bodies may contain `${...}` interpolations.
    pub fn is_template(&self) -> bool {
        self.quote == Quote::Template
    }

    /// The candidate's extent in the document.
    pub fn span(&self) -> Span {
        Span::new(self.base_offset, self.base_offset + self.text.len())
    }

    /// True if a cursor at `offset` is inside the value, both ends inclusive.
    pub fn encloses(&self, offset: usize) -> bool {
        self.base_offset <= offset && offset <= self.base_offset + self.text.len()
    }
}

/// Finds every `class="..."` / `className="..."` value outside comments,
/// sorted by offset.
pub fn attribute_candidates<'a>(text: &'a str, comments: &CommentMap) -> Vec<Candidate<'a>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();

    for attr in CLASS_ATTRIBUTES {
        for (idx, _) in text.match_indices(attr) {
            if comments.contains(idx) || !is_attr_boundary(bytes, idx, attr.len()) {
                continue;
            }
            let mut pos = skip_whitespace(bytes, idx + attr.len());
            if bytes.get(pos) != Some(&b'=') {
                continue;
            }
            pos = skip_whitespace(bytes, pos + 1);
            if bytes.get(pos) != Some(&b'"') {
                continue;
            }
            let value_start = pos + 1;
            let Some(len) = text[value_start..].find('"') else {
                continue;
            };
            if comments.contains(value_start) {
                continue;
            }
            out.push(Candidate {
                text: &text[value_start..value_start + len],
                base_offset: value_start,
                kind: CandidateKind::Attribute,
                quote: Quote::Double,
            });
        }
    }

    out.sort_by_key(|candidate| candidate.base_offset);
    out
}

/// Extracts each string and template literal from a call's arguments.
///
/// Literals are found with the same quote and escape rules as the comment
/// scan; literals starting inside a comment are skipped.
pub fn call_candidates<'a>(call: &CallSite<'a>, comments: &CommentMap) -> Vec<Candidate<'a>> {
    let args = call.args;
    let bytes = args.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(comment) = comments.range_at(call.args_start + i) {
            i = comment.end.saturating_sub(call.args_start).max(i + 1);
            continue;
        }
        let quote = match Quote::from_byte(bytes[i]) {
            Some(quote) if !is_escaped(bytes, i) => quote,
            _ => {
                i += 1;
                continue;
            }
        };
        let body_start = i + 1;
        let Some(body_end) = closing_quote(bytes, body_start, quote) else {
            break;
        };
        let base_offset = call.args_start + body_start;
        if !comments.contains(base_offset) {
            out.push(Candidate {
                text: &args[body_start..body_end],
                base_offset,
                kind: CandidateKind::FunctionArgs,
                quote,
            });
        }
        i = body_end + 1;
    }

    out
}

/// Calls that are not nested in the arguments of an earlier call.
///
/// `calls` must be sorted by start offset, as returned by [`find_calls`].
pub fn outermost_calls<'a, 'b>(calls: &'b [CallSite<'a>]) -> impl Iterator<Item = &'b CallSite<'a>> {
    let mut covered_until = 0;
    calls.iter().filter(move |call| {
        if call.call_start < covered_until {
            return false;
        }
        covered_until = call.call_end;
        true
    })
}

/// Every candidate in the document, in document order.
pub fn all_candidates<'a>(text: &'a str, comments: &CommentMap) -> Vec<Candidate<'a>> {
    let mut out = attribute_candidates(text, comments);
    let calls = find_calls(text, comments);
    for call in outermost_calls(&calls) {
        out.extend(call_candidates(call, comments));
    }
    out.sort_by_key(|candidate| candidate.base_offset);
    out
}

fn closing_quote(bytes: &[u8], from: usize, quote: Quote) -> Option<usize> {
    (from..bytes.len()).find(|&j| bytes[j] == quote.byte() && !is_escaped(bytes, j))
}

fn is_attr_boundary(bytes: &[u8], idx: usize, len: usize) -> bool {
    let prev_ok = idx == 0 || is_boundary_byte(bytes[idx - 1]);
    let next_ok = bytes
        .get(idx + len)
        .is_none_or(|&b| b == b'=' || b.is_ascii_whitespace());
    prev_ok && next_ok
}

fn is_boundary_byte(byte: u8) -> bool {
    !(byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-')
}

fn skip_whitespace(bytes: &[u8], mut idx: usize) -> usize {
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
        idx += 1;
    }
    idx
}
