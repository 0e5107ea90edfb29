//! Highlight modes and candidate selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::SyntaxError;
use crate::calls::find_calls;
use crate::comments::CommentMap;
use crate::locator::{Candidate, all_candidates, attribute_candidates, call_candidates, outermost_calls};

/// Which part of the document gets highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Every class string in the document
    #[default]
    Full,
    /// Only the class string or call enclosing the cursor
    Cursor,
}

impl HighlightMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightMode::Full => "full",
            HighlightMode::Cursor => "cursor",
        }
    }
}

impl std::fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HighlightMode {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(HighlightMode::Full),
            "cursor" => Ok(HighlightMode::Cursor),
            _ => Err(SyntaxError::UnknownMode(s.to_string())),
        }
    }
}

/// Chooses the candidates one scan processes.
///
/// In cursor mode an enclosing attribute value wins over an enclosing call.
/// For a call, every literal in its arguments is selected. Without a cursor,
/// or with the cursor outside any recognized region, nothing is selected.
pub fn select_candidates<'a>(
    text: &'a str,
    comments: &CommentMap,
    mode: HighlightMode,
    cursor: Option<usize>,
) -> Vec<Candidate<'a>> {
    match mode {
        HighlightMode::Full => all_candidates(text, comments),
        HighlightMode::Cursor => match cursor {
            Some(offset) => candidates_at(text, comments, offset),
            None => Vec::new(),
        },
    }
}

fn candidates_at<'a>(text: &'a str, comments: &CommentMap, offset: usize) -> Vec<Candidate<'a>> {
    if let Some(attribute) = attribute_candidates(text, comments)
        .into_iter()
        .find(|candidate| candidate.encloses(offset))
    {
        return vec![attribute];
    }

    let calls = find_calls(text, comments);
    outermost_calls(&calls)
        .find(|call| call.encloses(offset))
        .map(|call| call_candidates(call, comments))
        .unwrap_or_default()
}
