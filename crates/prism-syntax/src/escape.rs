//! Escape parity and quote tracking shared by every scanner.
//!
//! All scanners in this crate walk the text byte by byte. Quote characters,
//! brackets and the escape marker are ASCII, so a byte walk never splits a
//! multi-byte character on a position that matters.

/// The escape marker.
pub const ESCAPE: u8 = b'\\';

/// A quoted region's delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// `'...'`
    Single,
    /// `"..."`
    Double,
    /// `` `...` ``
    Template,
}

impl Quote {
    /// Returns the quote a byte opens, if any.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'\'' => Some(Quote::Single),
            b'"' => Some(Quote::Double),
            b'`' => Some(Quote::Template),
            _ => None,
        }
    }

    /// The delimiter byte.
    pub fn byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Double => b'"',
            Quote::Template => b'`',
        }
    }
}

/// Returns true if the byte at `index` is preceded by an odd run of escape
/// markers.
pub fn is_escaped(bytes: &[u8], index: usize) -> bool {
    let run = bytes[..index.min(bytes.len())]
        .iter()
        .rev()
        .take_while(|&&b| b == ESCAPE)
        .count();
    run % 2 == 1
}

/// Tracks whether a forward scan is inside a quoted region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteTracker {
    open: Option<Quote>,
}

impl QuoteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently open quote, if any.
    pub fn current(&self) -> Option<Quote> {
        self.open
    }

    pub fn is_quoted(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds the byte at `index`. Returns true if the byte opened or closed a
    /// quoted region, i.e. it is a delimiter rather than content.
    ///
    /// An unescaped quote byte opens a region when none is open; only an
    /// unescaped byte matching the open delimiter closes it.
    pub fn step(&mut self, bytes: &[u8], index: usize) -> bool {
        let byte = bytes[index];
        match self.open {
            Some(quote) => {
                if byte == quote.byte() && !is_escaped(bytes, index) {
                    self.open = None;
                    return true;
                }
                false
            }
            None => match Quote::from_byte(byte) {
                Some(quote) if !is_escaped(bytes, index) => {
                    self.open = Some(quote);
                    true
                }
                _ => false,
            },
        }
    }
}
