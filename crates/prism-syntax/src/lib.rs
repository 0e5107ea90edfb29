//! # Prism Syntax
//!
//! Finds utility-class lists embedded in source text and classifies each class
//! token into spans a host can paint.
//!
//! ## Pipeline
//!
//! ```text
//! text ──► CommentMap ──► candidates (attributes, merge-function literals)
//!                              │  filtered by HighlightMode + cursor
//!                              ▼
//!                     template static runs ──► tokens ──► classification
//!                                                              │
//!                                                              ▼
//!                                HighlightResult { variant, important, arbitrary, utility }
//! ```
//!
//! There is no parser behind this: every stage is a forward scan over bytes
//! with a handful of state (quote, bracket depth), cheap enough to run on
//! every keystroke.
//!
//! ## Example
//!
//! ```
//! use prism_syntax::{scan, HighlightMode};
//!
//! let text = r#"<div class="md:!p-4 bg-[#0af]">"#;
//! let result = scan(text, None, HighlightMode::Full);
//!
//! assert_eq!(result.utility.len(), 2);
//! assert_eq!(&text[result.variant[0].range()], "md:");
//! assert_eq!(&text[result.arbitrary[0].range()], "[#0af]");
//! ```

pub mod calls;
pub mod comments;
pub mod escape;
pub mod highlight;
pub mod locator;
pub mod mode;
pub mod span;
pub mod template;
pub mod tokens;

pub use calls::{CallSite, MERGE_FUNCTIONS, find_calls};
pub use comments::CommentMap;
pub use highlight::{HighlightResult, SpanCategory, scan};
pub use locator::{CLASS_ATTRIBUTES, Candidate, CandidateKind};
pub use mode::{HighlightMode, select_candidates};
pub use span::Span;
pub use tokens::{ClassifiedToken, Token, split_tokens};

/// Errors from parsing user-facing syntax settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unknown highlight mode: {0} (expected \"full\" or \"cursor\")")]
    UnknownMode(String),
}
