//! An overlay host that paints into a string for the terminal.

use prism_core::{DecorationStyle, OverlayHost};
use prism_syntax::{HighlightResult, Span, SpanCategory};

const RESET: &str = "\x1b[0m";

struct Decoration {
    category: SpanCategory,
    style: DecorationStyle,
    spans: Vec<Span>,
}

/// Collects decorations and renders them as ANSI escapes.
///
/// Handles index into `slots`; a disposed handle leaves a `None` behind so
/// indices stay stable.
#[derive(Default)]
pub struct TerminalHost {
    slots: Vec<Option<Decoration>>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self) -> impl Iterator<Item = &Decoration> {
        self.slots.iter().flatten()
    }

    /// Number of decorations not yet disposed.
    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Renders `text` with every live decoration applied.
    ///
    /// Where spans of several categories overlap, the most specific one is
    /// shown: important, then variant, then arbitrary, then utility.
    pub fn render_ansi(&self, text: &str) -> String {
        let mut layers: Vec<&Decoration> = self.live().collect();
        layers.sort_by_key(|decoration| specificity(decoration.category));

        let mut paint: Vec<Option<&DecorationStyle>> = vec![None; text.len()];
        for decoration in layers {
            for span in &decoration.spans {
                let end = span.end.min(text.len());
                let start = span.start.min(end);
                paint[start..end].fill(Some(&decoration.style));
            }
        }

        let mut out = String::with_capacity(text.len() * 2);
        let mut current = None;
        for (i, ch) in text.char_indices() {
            let style = paint[i];
            if style != current {
                if current.is_some() {
                    out.push_str(RESET);
                }
                if let Some(style) = style {
                    out.push_str(&sgr(style));
                }
                current = style;
            }
            out.push(ch);
        }
        if current.is_some() {
            out.push_str(RESET);
        }
        out
    }
}

impl OverlayHost for TerminalHost {
    type Handle = usize;

    fn create_decoration(&mut self, category: SpanCategory, style: &DecorationStyle) -> usize {
        self.slots.push(Some(Decoration {
            category,
            style: *style,
            spans: Vec::new(),
        }));
        self.slots.len() - 1
    }

    fn set_spans(&mut self, handle: &usize, spans: &[Span]) {
        if let Some(Some(decoration)) = self.slots.get_mut(*handle) {
            decoration.spans = spans.to_vec();
        }
    }

    fn dispose(&mut self, handle: usize) {
        if let Some(slot) = self.slots.get_mut(handle) {
            *slot = None;
        }
    }
}

/// One line per span: `category start..end "text"`, in category order.
pub fn render_spans(text: &str, result: &HighlightResult) -> String {
    let mut out = String::new();
    for category in SpanCategory::ALL {
        for span in result.spans(category) {
            let slice = span.slice(text).unwrap_or_default();
            out.push_str(&format!("{category} {span} {slice:?}\n"));
        }
    }
    out
}

fn specificity(category: SpanCategory) -> u8 {
    match category {
        SpanCategory::Utility => 0,
        SpanCategory::Arbitrary => 1,
        SpanCategory::Variant => 2,
        SpanCategory::Important => 3,
    }
}

/// Select Graphic Rendition sequence for a 24-bit color style.
fn sgr(style: &DecorationStyle) -> String {
    let mut codes = Vec::with_capacity(3);
    if style.is_bold() {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    let c = style.color;
    codes.push(format!("38;2;{};{};{}", c.r, c.g, c.b));
    format!("\x1b[{}m", codes.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Color, PrismColors};

    fn style(category: SpanCategory) -> DecorationStyle {
        let colors = PrismColors {
            variant: Color::rgb(1, 1, 1),
            important: Color::rgb(2, 2, 2),
            arbitrary: Color::rgb(3, 3, 3),
            utility: Color::rgb(4, 4, 4),
        };
        DecorationStyle::for_category(category, &colors)
    }

    #[test]
    fn test_plain_text_passes_through() {
        let host = TerminalHost::new();
        assert_eq!(host.render_ansi("<p class=\"x\">"), "<p class=\"x\">");
    }

    #[test]
    fn test_most_specific_category_wins() {
        let mut host = TerminalHost::new();
        let utility = host.create_decoration(SpanCategory::Utility, &style(SpanCategory::Utility));
        let variant = host.create_decoration(SpanCategory::Variant, &style(SpanCategory::Variant));
        host.set_spans(&utility, &[Span::new(0, 5)]);
        host.set_spans(&variant, &[Span::new(0, 3)]);

        assert_eq!(
            host.render_ansi("md:p4 x"),
            "\x1b[3;38;2;1;1;1mmd:\x1b[0m\x1b[38;2;4;4;4mp4\x1b[0m x"
        );
    }

    #[test]
    fn test_important_is_bold() {
        let mut host = TerminalHost::new();
        let important = host.create_decoration(SpanCategory::Important, &style(SpanCategory::Important));
        host.set_spans(&important, &[Span::new(0, 1)]);
        assert_eq!(host.render_ansi("!"), "\x1b[1;38;2;2;2;2m!\x1b[0m");
    }

    #[test]
    fn test_disposed_decorations_are_not_rendered() {
        let mut host = TerminalHost::new();
        let handle = host.create_decoration(SpanCategory::Utility, &style(SpanCategory::Utility));
        host.set_spans(&handle, &[Span::new(0, 2)]);
        host.dispose(handle);

        assert_eq!(host.live_count(), 0);
        assert_eq!(host.render_ansi("p4"), "p4");
    }

    #[test]
    fn test_multibyte_text() {
        let mut host = TerminalHost::new();
        let handle = host.create_decoration(SpanCategory::Utility, &style(SpanCategory::Utility));
        host.set_spans(&handle, &[Span::new(3, 6)]);
        assert_eq!(host.render_ansi("é a-1"), "é \x1b[38;2;4;4;4ma-1\x1b[0m");
    }

    #[test]
    fn test_render_spans() {
        let text = "<p class=\"sm:m-1\">";
        let result = prism_syntax::scan(text, None, prism_syntax::HighlightMode::Full);
        assert_eq!(
            render_spans(text, &result),
            "variant 10..13 \"sm:\"\nutility 10..16 \"sm:m-1\"\n"
        );
    }
}
