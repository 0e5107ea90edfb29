//! Rope-backed text buffer with a single cursor.
//!
//! ## Offsets
//!
//! The rope is indexed by character. Scanners work on the UTF-8 text and
//! report byte offsets, so the buffer exposes both and keeps the cursor as a
//! character index internally; it can never land inside a multi-byte
//! character.

use ropey::Rope;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::{BufferError, BufferResult, Position};

/// A text buffer backed by a rope.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// The rope holding our text content
    rope: Rope,

    /// Cursor as a character index
    cursor: usize,

    /// Whether the buffer changed since it was loaded
    modified: bool,

    /// Associated file path (if any)
    file_path: Option<PathBuf>,
}

impl TextBuffer {
    /// Creates a new empty buffer.
    ///
    /// # Example
    /// ```
    /// use prism_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::from("")
    }

    /// Loads a buffer from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut buffer = Self::from(content.as_str());
        buffer.file_path = Some(path.to_path_buf());
        Ok(buffer)
    }

    // ==================== Text Access ====================

    /// Returns the entire text content.
    ///
    /// Small buffers borrow; buffers spanning several rope chunks allocate.
    #[inline]
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        self.rope.slice(..).into()
    }

    /// Returns a slice of text by character range.
    pub fn slice(&self, range: Range<usize>) -> BufferResult<std::borrow::Cow<'_, str>> {
        self.check_char_range(&range)?;
        Ok(self.rope.slice(range).into())
    }

    // ==================== Measurements ====================

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of characters in the buffer.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of bytes in the buffer's UTF-8 text.
    #[inline]
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Number of lines. An empty buffer has 1 line.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    // ==================== Mutations ====================

    /// Inserts text at a character index.
    ///
    /// A cursor at or after the insertion point moves right with the text.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }

        self.rope.insert(char_idx, text);
        if self.cursor >= char_idx {
            self.cursor += text.chars().count();
        }
        self.modified = true;
        Ok(())
    }

    /// Deletes text in a character range and returns it.
    ///
    /// A cursor inside the range moves to its start; a cursor after it moves
    /// left by the deleted length.
    pub fn delete(&mut self, range: Range<usize>) -> BufferResult<String> {
        self.check_char_range(&range)?;

        let deleted: String = self.rope.slice(range.clone()).into();
        self.rope.remove(range.clone());
        if self.cursor >= range.end {
            self.cursor -= range.len();
        } else if self.cursor > range.start {
            self.cursor = range.start;
        }
        self.modified = true;
        Ok(deleted)
    }

    /// Replaces text in a character range, returning the removed text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> BufferResult<String> {
        let deleted = self.delete(range.clone())?;
        self.insert(range.start, text)?;
        Ok(deleted)
    }

    // ==================== Cursor ====================

    /// The cursor as a byte offset into [`TextBuffer::text`].
    pub fn cursor_offset(&self) -> usize {
        self.rope.char_to_byte(self.cursor)
    }

    /// The cursor as a character index.
    pub fn cursor_char(&self) -> usize {
        self.cursor
    }

    /// The cursor as a line/column position.
    pub fn cursor_position(&self) -> Position {
        let line = self.rope.char_to_line(self.cursor);
        Position::new(line, self.cursor - self.rope.line_to_char(line))
    }

    /// Moves the cursor to a byte offset. An offset inside a multi-byte
    /// character snaps to that character's start.
    pub fn set_cursor(&mut self, byte_offset: usize) -> BufferResult<()> {
        if byte_offset > self.len_bytes() {
            return Err(BufferError::InvalidByteOffset(byte_offset));
        }
        self.cursor = self.rope.byte_to_char(byte_offset);
        Ok(())
    }

    /// Moves the cursor to a line/column position.
    pub fn set_cursor_position(&mut self, pos: Position) -> BufferResult<()> {
        self.cursor = self.position_to_char_idx(pos)?;
        Ok(())
    }

    // ==================== Position Conversion ====================

    /// Converts a Position (line, column) to a character index.
    ///
    /// The column may sit at the end of its line.
    pub fn position_to_char_idx(&self, pos: Position) -> BufferResult<usize> {
        let out_of_bounds = BufferError::PositionOutOfBounds {
            line: pos.line,
            column: pos.column,
        };
        if pos.line >= self.len_lines() {
            return Err(out_of_bounds);
        }

        let line_start = self.rope.line_to_char(pos.line);
        if pos.column > self.line_len_without_break(pos.line) {
            return Err(out_of_bounds);
        }
        Ok(line_start + pos.column)
    }

    /// Converts a Position to a byte offset.
    pub fn byte_offset_of(&self, pos: Position) -> BufferResult<usize> {
        let char_idx = self.position_to_char_idx(pos)?;
        Ok(self.rope.char_to_byte(char_idx))
    }

    /// Converts a byte offset to a Position.
    pub fn position_of(&self, byte_offset: usize) -> BufferResult<Position> {
        if byte_offset > self.len_bytes() {
            return Err(BufferError::InvalidByteOffset(byte_offset));
        }
        let char_idx = self.rope.byte_to_char(byte_offset);
        let line = self.rope.char_to_line(char_idx);
        Ok(Position::new(line, char_idx - self.rope.line_to_char(line)))
    }

    /// Converts a byte offset to a character index.
    pub fn byte_to_char(&self, byte_offset: usize) -> BufferResult<usize> {
        if byte_offset > self.len_bytes() {
            return Err(BufferError::InvalidByteOffset(byte_offset));
        }
        Ok(self.rope.byte_to_char(byte_offset))
    }

    // ==================== State Queries ====================

    /// Returns true if the buffer has been edited.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the associated file path, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn check_char_range(&self, range: &Range<usize>) -> BufferResult<()> {
        if range.end > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(range.end));
        }
        if range.start > range.end {
            return Err(BufferError::InvalidCharIndex(range.start));
        }
        Ok(())
    }

    /// Line length in characters, excluding its line break.
    fn line_len_without_break(&self, line_idx: usize) -> usize {
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && line.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
            cursor: 0,
            modified: false,
            file_path: None,
        }
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
