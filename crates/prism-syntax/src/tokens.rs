//! Splitting class strings into tokens and classifying each token.
//!
//! ```text
//!   sm:hover:!bg-[#123]
//!   ├──────┤│   ├────┤      variant prefix, important marker, arbitrary value
//!   ├─────────────────┤     utility (always the whole token)
//! ```

use crate::escape::{Quote, is_escaped};
use crate::span::Span;

/// One whitespace-delimited unit of a class string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Offset of `text[0]` relative to the start of the class string
    pub start: usize,
}

impl Token<'_> {
    /// The token's extent relative to the class string.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.start + self.text.len())
    }
}

/// Splits `text` on whitespace, keeping `[...]` segments intact.
///
/// Whitespace inside an open bracket, or inside a quote opened within a
/// bracket, does not end a token. A stray `]` never drives the depth below
/// zero, and an unclosed `[` extends the token to the end of `text`.
pub fn split_tokens(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<Quote> = None;
    let mut start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if let Some(open) = quote {
            if ch == char::from(open.byte()) && !is_escaped(bytes, i) {
                quote = None;
            }
            continue;
        }

        if depth > 0 {
            match ch {
                '[' if !is_escaped(bytes, i) => depth += 1,
                ']' if !is_escaped(bytes, i) => depth -= 1,
                _ => {
                    if !is_escaped(bytes, i) {
                        quote = quote_of(ch);
                    }
                }
            }
            continue;
        }

        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token {
                    text: &text[s..i],
                    start: s,
                });
            }
            continue;
        }

        start.get_or_insert(i);
        if ch == '[' && !is_escaped(bytes, i) {
            depth = 1;
        }
    }

    if let Some(s) = start {
        tokens.push(Token {
            text: &text[s..],
            start: s,
        });
    }

    tokens
}

/// A token plus its decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken<'a> {
    pub token: Token<'a>,
    /// Length of the colon-delimited variant chain, including its last `:`
    pub variant_prefix_len: usize,
    /// Whether a `!` immediately follows the variant prefix
    pub has_important_marker: bool,
    /// Outermost `[...]` spans, relative to the token start
    pub arbitrary_spans: Vec<Span>,
}

impl<'a> ClassifiedToken<'a> {
    /// Classifies a token in a single left-to-right pass.
    ///
    /// The last unescaped `:` outside brackets ends the variant prefix, so
    /// `sm:hover:flex` has a prefix of `sm:hover:`. Brackets are matched with
    /// quote awareness; an unclosed bracket contributes no arbitrary span.
    pub fn classify(token: Token<'a>) -> Self {
        let bytes = token.text.as_bytes();
        let mut depth = 0usize;
        let mut quote: Option<Quote> = None;
        let mut open = 0;
        let mut variant_prefix_len = 0;
        let mut arbitrary_spans = Vec::new();

        for i in 0..bytes.len() {
            let byte = bytes[i];
            if let Some(q) = quote {
                if byte == q.byte() && !is_escaped(bytes, i) {
                    quote = None;
                }
                continue;
            }
            if is_escaped(bytes, i) {
                continue;
            }
            match byte {
                b'[' => {
                    if depth == 0 {
                        open = i;
                    }
                    depth += 1;
                }
                b']' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        arbitrary_spans.push(Span::new(open, i + 1));
                    }
                }
                b':' if depth == 0 => variant_prefix_len = i + 1,
                _ if depth > 0 => quote = Quote::from_byte(byte),
                _ => {}
            }
        }

        Self {
            token,
            variant_prefix_len,
            has_important_marker: bytes.get(variant_prefix_len) == Some(&b'!'),
            arbitrary_spans,
        }
    }

    /// The variant prefix, relative to the token start.
    pub fn variant_span(&self) -> Option<Span> {
        (self.variant_prefix_len > 0).then(|| Span::new(0, self.variant_prefix_len))
    }

    /// The important marker, relative to the token start.
    pub fn important_span(&self) -> Option<Span> {
        self.has_important_marker
            .then(|| Span::new(self.variant_prefix_len, self.variant_prefix_len + 1))
    }

    /// The whole token, relative to the token start.
    pub fn utility_span(&self) -> Span {
        Span::new(0, self.token.text.len())
    }
}

fn quote_of(ch: char) -> Option<Quote> {
    u8::try_from(ch).ok().and_then(Quote::from_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        split_tokens(text).into_iter().map(|t| t.text).collect()
    }

    fn classify(text: &str) -> ClassifiedToken<'_> {
        ClassifiedToken::classify(Token { text, start: 0 })
    }

    #[test]
    fn test_split_on_whitespace_runs() {
        let tokens = split_tokens("  p-2\tm-1\n\n flex ");
        assert_eq!(
            tokens,
            vec![
                Token { text: "p-2", start: 2 },
                Token { text: "m-1", start: 6 },
                Token { text: "flex", start: 12 },
            ]
        );
    }

    #[test]
    fn test_brackets_keep_whitespace() {
        assert_eq!(
            words("grid-cols-[1fr 2fr] gap-2"),
            vec!["grid-cols-[1fr 2fr]", "gap-2"]
        );
    }

    #[test]
    fn test_quotes_inside_brackets() {
        assert_eq!(
            words("content-['a ] b'] p-1"),
            vec!["content-['a ] b']", "p-1"]
        );
    }

    #[test]
    fn test_stray_closing_bracket() {
        assert_eq!(words("a] b [c d]"), vec!["a]", "b", "[c d]"]);
    }

    #[test]
    fn test_unclosed_bracket_extends_to_end() {
        assert_eq!(words("p-2 w-[calc(100% - 2px) m-1"), vec!["p-2", "w-[calc(100% - 2px) m-1"]);
    }

    #[test]
    fn test_unicode_whitespace_boundary() {
        assert_eq!(words("p-2\u{00A0}m-1"), vec!["p-2", "m-1"]);
    }

    #[test]
    fn test_variant_chain_and_important() {
        let token = classify("sm:hover:!bg-red-500");
        assert_eq!(token.variant_prefix_len, 9);
        assert!(token.has_important_marker);
        assert_eq!(token.important_span(), Some(Span::new(9, 10)));
        assert_eq!(token.utility_span(), Span::new(0, 20));
        assert!(token.arbitrary_spans.is_empty());
    }

    #[test]
    fn test_arbitrary_variant() {
        let token = classify("data-[state=open]:opacity-0");
        assert_eq!(token.arbitrary_spans, vec![Span::new(5, 17)]);
        assert_eq!(token.variant_span(), Some(Span::new(0, 18)));
        assert!(!token.has_important_marker);
    }

    #[test]
    fn test_colons_inside_brackets_are_not_variants() {
        let token = classify("[mask-type:luminance]");
        assert_eq!(token.variant_prefix_len, 0);
        assert_eq!(token.arbitrary_spans, vec![Span::new(0, 21)]);

        let token = classify("bg-[url('a:b]')]");
        assert_eq!(token.variant_prefix_len, 0);
        assert_eq!(token.arbitrary_spans, vec![Span::new(3, 16)]);
    }

    #[test]
    fn test_multiple_and_nested_arbitrary_spans() {
        let token = classify("[&_[data-x]]:w-[3px]");
        assert_eq!(token.arbitrary_spans, vec![Span::new(0, 12), Span::new(15, 20)]);
        assert_eq!(token.variant_prefix_len, 13);
    }

    #[test]
    fn test_unclosed_bracket_has_no_arbitrary_span() {
        let token = classify("w-[3px");
        assert!(token.arbitrary_spans.is_empty());
    }

    #[test]
    fn test_plain_utility() {
        let token = classify("flex");
        assert_eq!(token.variant_span(), None);
        assert_eq!(token.important_span(), None);
        assert_eq!(token.utility_span(), Span::new(0, 4));
    }

    #[test]
    fn test_leading_important_without_variant() {
        let token = classify("!p-2");
        assert!(token.has_important_marker);
        assert_eq!(token.important_span(), Some(Span::new(0, 1)));
    }
}
