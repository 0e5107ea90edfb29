//! Paint handles and their lifecycle.
//!
//! A host (an editor, a terminal renderer) paints spans through opaque
//! handles, one per [`SpanCategory`]. [`OverlayManager`] owns at most one live
//! set of four handles and guarantees:
//!
//! - handles are created lazily, bound to the colors of the scan that needed them
//! - every apply replaces each category's spans wholesale (empty clears it)
//! - a handle is disposed exactly once, and never used after disposal
//!
//! The last point holds by construction: [`OverlayHost::dispose`] takes the
//! handle by value and the manager `take()`s its only reference first.

use prism_syntax::{HighlightResult, Span, SpanCategory};

use crate::colors::{Color, PrismColors};

/// How spans of one category are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecorationStyle {
    pub color: Color,
    pub italic: bool,
    /// CSS-style font weight; `None` keeps the host's default
    pub weight: Option<u16>,
}

impl DecorationStyle {
    /// The style for `category` painted with `colors`.
    pub fn for_category(category: SpanCategory, colors: &PrismColors) -> Self {
        let color = colors.get(category);
        match category {
            SpanCategory::Variant => Self {
                color,
                italic: true,
                weight: None,
            },
            SpanCategory::Important => Self {
                color,
                italic: false,
                weight: Some(600),
            },
            SpanCategory::Arbitrary => Self {
                color,
                italic: false,
                weight: None,
            },
            SpanCategory::Utility => Self {
                color,
                italic: false,
                weight: Some(500),
            },
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight.is_some_and(|w| w >= 600)
    }
}

/// Something that can paint spans.
pub trait OverlayHost {
    /// Host-side reference to one decoration.
    type Handle;

    /// Creates a decoration for one category.
    fn create_decoration(&mut self, category: SpanCategory, style: &DecorationStyle) -> Self::Handle;

    /// Replaces every span painted with `handle`.
    fn set_spans(&mut self, handle: &Self::Handle, spans: &[Span]);

    /// Releases a decoration and everything it painted.
    fn dispose(&mut self, handle: Self::Handle);
}

struct HandleSet<T> {
    colors: PrismColors,
    /// Indexed by `SpanCategory::index`
    handles: [T; 4],
}

impl<T> HandleSet<T> {
    fn create<H: OverlayHost<Handle = T>>(host: &mut H, colors: &PrismColors) -> Self {
        let handles = SpanCategory::ALL
            .map(|category| host.create_decoration(category, &DecorationStyle::for_category(category, colors)));
        tracing::debug!("Created overlay handles");
        Self {
            colors: *colors,
            handles,
        }
    }
}

/// Owns the live handle set, if any.
pub struct OverlayManager<H: OverlayHost> {
    live: Option<HandleSet<H::Handle>>,
}

impl<H: OverlayHost> OverlayManager<H> {
    pub fn new() -> Self {
        Self { live: None }
    }

    /// Paints `result`, creating handles first if none are live.
    ///
    /// A live set bound to different colors is disposed and replaced.
    pub fn apply(&mut self, host: &mut H, colors: &PrismColors, result: &HighlightResult) {
        if self.live.as_ref().is_some_and(|set| set.colors != *colors) {
            tracing::debug!("Colors changed, recreating overlay handles");
            self.clear(host);
        }

        let set = self.live.get_or_insert_with(|| HandleSet::create(host, colors));
        for category in SpanCategory::ALL {
            host.set_spans(&set.handles[category.index()], result.spans(category));
        }
    }

    /// Disposes the live handles. Returns false if there were none.
    pub fn clear(&mut self, host: &mut H) -> bool {
        let Some(set) = self.live.take() else {
            return false;
        };
        for handle in set.handles {
            host.dispose(handle);
        }
        tracing::debug!("Disposed overlay handles");
        true
    }

    /// True while a handle set exists.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Colors of the live handle set.
    pub fn colors(&self) -> Option<&PrismColors> {
        self.live.as_ref().map(|set| &set.colors)
    }
}

impl<H: OverlayHost> Default for OverlayManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::colors::Preset;
    use std::collections::{HashMap, HashSet};

    /// Records what a host would paint and panics on use-after-dispose.
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        next: u32,
        pub(crate) created: Vec<(SpanCategory, DecorationStyle)>,
        pub(crate) live: HashMap<u32, SpanCategory>,
        pub(crate) disposed: HashSet<u32>,
        pub(crate) painted: HashMap<SpanCategory, Vec<Span>>,
    }

    impl RecordingHost {
        pub(crate) fn painted(&self, category: SpanCategory) -> &[Span] {
            self.painted.get(&category).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    impl OverlayHost for RecordingHost {
        type Handle = u32;

        fn create_decoration(&mut self, category: SpanCategory, style: &DecorationStyle) -> u32 {
            self.next += 1;
            self.created.push((category, *style));
            self.live.insert(self.next, category);
            self.next
        }

        fn set_spans(&mut self, handle: &u32, spans: &[Span]) {
            assert!(!self.disposed.contains(handle), "handle {handle} used after dispose");
            let category = self.live[handle];
            self.painted.insert(category, spans.to_vec());
        }

        fn dispose(&mut self, handle: u32) {
            assert!(self.disposed.insert(handle), "handle {handle} disposed twice");
            if let Some(category) = self.live.remove(&handle) {
                self.painted.remove(&category);
            }
        }
    }

    fn result_with_utility(spans: &[Span]) -> HighlightResult {
        HighlightResult {
            utility: spans.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_styles() {
        let colors = Preset::Soft.colors();
        let variant = DecorationStyle::for_category(SpanCategory::Variant, &colors);
        assert!(variant.italic);
        assert_eq!(variant.color, colors.variant);

        let important = DecorationStyle::for_category(SpanCategory::Important, &colors);
        assert_eq!(important.weight, Some(600));
        assert!(important.is_bold());

        let arbitrary = DecorationStyle::for_category(SpanCategory::Arbitrary, &colors);
        assert_eq!((arbitrary.italic, arbitrary.weight), (false, None));

        let utility = DecorationStyle::for_category(SpanCategory::Utility, &colors);
        assert_eq!(utility.weight, Some(500));
        assert!(!utility.is_bold());
    }

    #[test]
    fn test_handles_created_lazily_and_reused() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let colors = PrismColors::default();
        assert!(!manager.is_live());

        manager.apply(&mut host, &colors, &result_with_utility(&[Span::new(0, 3)]));
        manager.apply(&mut host, &colors, &result_with_utility(&[Span::new(4, 6)]));

        assert_eq!(host.created.len(), 4);
        assert_eq!(host.painted(SpanCategory::Utility), &[Span::new(4, 6)]);
        assert_eq!(manager.colors(), Some(&colors));
    }

    #[test]
    fn test_empty_result_clears_categories() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let colors = PrismColors::default();

        manager.apply(&mut host, &colors, &result_with_utility(&[Span::new(0, 3)]));
        manager.apply(&mut host, &colors, &HighlightResult::default());

        for category in SpanCategory::ALL {
            assert!(host.painted(category).is_empty());
        }
        assert!(manager.is_live());
    }

    #[test]
    fn test_color_change_recreates_handles() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let result = result_with_utility(&[Span::new(0, 3)]);

        manager.apply(&mut host, &Preset::Calm.colors(), &result);
        manager.apply(&mut host, &Preset::Clear.colors(), &result);

        assert_eq!(host.created.len(), 8);
        assert_eq!(host.disposed.len(), 4);
        assert_eq!(host.live.len(), 4);
        assert_eq!(host.created[7].1.color, Preset::Clear.colors().utility);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        manager.apply(&mut host, &PrismColors::default(), &HighlightResult::default());

        assert!(manager.clear(&mut host));
        assert!(!manager.clear(&mut host));
        assert_eq!(host.disposed.len(), 4);
        assert!(host.live.is_empty());

        // A later scan gets fresh handles.
        manager.apply(&mut host, &PrismColors::default(), &result_with_utility(&[Span::new(1, 2)]));
        assert_eq!(host.live.len(), 4);
        assert!(host.live.keys().all(|h| !host.disposed.contains(h)));
    }
}
