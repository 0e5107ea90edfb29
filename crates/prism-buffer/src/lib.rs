//! # Prism Buffer
//!
//! The document text a highlighting session scans, held in a rope, plus the
//! cursor the host moves around.
//!
//! Scanning works in byte offsets into the document's UTF-8 text; editing
//! works in character indices, and users think in line:column. The buffer
//! converts between the three.

mod buffer;
mod position;

pub use buffer::TextBuffer;
pub use position::{ParsePositionError, Position};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Invalid byte offset: {0}")]
    InvalidByteOffset(usize),

    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
