//! # Prism Core
//!
//! Everything between the pure scanner and a host that paints text.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Session<H>                        │
//! │  ┌────────────┐ ┌─────────────┐ ┌──────────────────────┐ │
//! │  │ PrismConfig│ │ PrismColors │ │       EventBus       │ │
//! │  └────────────┘ └─────────────┘ └──────────────────────┘ │
//! │  ┌──────────────────────┐   scan()  ┌──────────────────┐ │
//! │  │ Documents (by id)    │ ────────► │ OverlayManager<H>│ │
//! │  └──────────────────────┘           └────────┬─────────┘ │
//! └──────────────────────────────────────────────┼───────────┘
//!                                                ▼
//!                                         H: OverlayHost
//! ```
//!
//! ## Example
//!
//! ```
//! use prism_core::{DecorationStyle, OverlayHost, PrismConfig, Session};
//! use prism_syntax::{Span, SpanCategory};
//!
//! /// Keeps the last spans painted per category.
//! #[derive(Default)]
//! struct Spans(Vec<Vec<Span>>);
//!
//! impl OverlayHost for Spans {
//!     type Handle = usize;
//!     fn create_decoration(&mut self, _: SpanCategory, _: &DecorationStyle) -> usize {
//!         self.0.push(Vec::new());
//!         self.0.len() - 1
//!     }
//!     fn set_spans(&mut self, handle: &usize, spans: &[Span]) {
//!         self.0[*handle] = spans.to_vec();
//!     }
//!     fn dispose(&mut self, handle: usize) {
//!         self.0[handle].clear();
//!     }
//! }
//!
//! let config = PrismConfig { enabled: true, ..Default::default() };
//! let mut session = Session::new(Spans::default(), config);
//! session.open(r#"<p class="p-4 sm:flex">"#);
//! assert_eq!(session.host().0[3], vec![Span::new(10, 13), Span::new(14, 21)]);
//! ```

pub mod colors;
pub mod config;
pub mod document;
pub mod event;
pub mod overlay;
pub mod session;

pub use colors::{Color, ColorError, ColorOverrides, Preset, PrismColors, resolve_colors};
pub use config::{ConfigError, PrismConfig};
pub use document::{Document, DocumentId};
pub use event::{EventBus, EventHandler, PrismEvent, Status};
pub use overlay::{DecorationStyle, OverlayHost, OverlayManager};
pub use session::Session;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Buffer error: {0}")]
    Buffer(#[from] prism_buffer::BufferError),
}
