//! The scan pipeline and its output.

use serde::{Deserialize, Serialize};

use crate::comments::CommentMap;
use crate::locator::Candidate;
use crate::mode::{HighlightMode, select_candidates};
use crate::span::Span;
use crate::template::static_runs;
use crate::tokens::{ClassifiedToken, split_tokens};

/// The four kinds of painted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanCategory {
    Variant,
    Important,
    Arbitrary,
    Utility,
}

impl SpanCategory {
    /// All categories, in painting order.
    pub const ALL: [SpanCategory; 4] = [
        SpanCategory::Variant,
        SpanCategory::Important,
        SpanCategory::Arbitrary,
        SpanCategory::Utility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpanCategory::Variant => "variant",
            SpanCategory::Important => "important",
            SpanCategory::Arbitrary => "arbitrary",
            SpanCategory::Utility => "utility",
        }
    }

    /// Position in [`SpanCategory::ALL`].
    pub fn index(&self) -> usize {
        match self {
            SpanCategory::Variant => 0,
            SpanCategory::Important => 1,
            SpanCategory::Arbitrary => 2,
            SpanCategory::Utility => 3,
        }
    }
}

impl std::fmt::Display for SpanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classified spans of one scan, in absolute document offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightResult {
    pub variant: Vec<Span>,
    pub important: Vec<Span>,
    pub arbitrary: Vec<Span>,
    pub utility: Vec<Span>,
}

impl HighlightResult {
    /// Spans of one category.
    pub fn spans(&self, category: SpanCategory) -> &[Span] {
        match category {
            SpanCategory::Variant => &self.variant,
            SpanCategory::Important => &self.important,
            SpanCategory::Arbitrary => &self.arbitrary,
            SpanCategory::Utility => &self.utility,
        }
    }

    /// Per-category span counts, in [`SpanCategory::ALL`] order.
    pub fn counts(&self) -> [usize; 4] {
        SpanCategory::ALL.map(|category| self.spans(category).len())
    }

    /// True if no category has a span.
    pub fn is_empty(&self) -> bool {
        self.counts().iter().all(|&n| n == 0)
    }

    /// Adds the spans of every token in `candidate`.
    pub fn add_candidate(&mut self, candidate: &Candidate<'_>) {
        if candidate.is_template() {
            for run in static_runs(candidate.text) {
                self.add_class_string(run.text, candidate.base_offset + run.offset);
            }
        } else {
            self.add_class_string(candidate.text, candidate.base_offset);
        }
    }

    /// Tokenizes and classifies a class string whose first byte sits at
    /// `base` in the document.
    pub fn add_class_string(&mut self, text: &str, base: usize) {
        for token in split_tokens(text) {
            let classified = ClassifiedToken::classify(token);
            let origin = base + token.start;

            if let Some(span) = classified.variant_span() {
                self.variant.push(span.shifted(origin));
            }
            if let Some(span) = classified.important_span() {
                self.important.push(span.shifted(origin));
            }
            self.arbitrary
                .extend(classified.arbitrary_spans.iter().map(|span| span.shifted(origin)));
            self.utility.push(classified.utility_span().shifted(origin));
        }
    }
}

/// Scans `text` and classifies every selected class token.
///
/// `cursor` is a byte offset and only matters in [`HighlightMode::Cursor`].
/// The result depends on nothing but the arguments; scanning the same input
/// twice yields identical spans.
pub fn scan(text: &str, cursor: Option<usize>, mode: HighlightMode) -> HighlightResult {
    let comments = CommentMap::build(text);
    let candidates = select_candidates(text, &comments, mode, cursor);

    let mut result = HighlightResult::default();
    for candidate in &candidates {
        result.add_candidate(candidate);
    }

    tracing::debug!(
        %mode,
        candidates = candidates.len(),
        tokens = result.utility.len(),
        "scan complete"
    );
    result
}
