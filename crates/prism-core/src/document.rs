//! Open documents.
//!
//! `DocumentId` is a newtype over a v4 `Uuid`, so ids from different sessions
//! never collide and can't be confused with offsets or indices.

use prism_buffer::TextBuffer;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::CoreResult;

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new unique document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A buffer plus the name it is shown under.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    buffer: TextBuffer,
    name: String,
}

impl Document {
    /// Creates an untitled document holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            id: DocumentId::new(),
            buffer: TextBuffer::from(text),
            name: "Untitled".to_string(),
        }
    }

    /// Opens a document from a file; the name is the file name.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string());

        Ok(Self {
            id: DocumentId::new(),
            buffer,
            name,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
        let a = Document::from_text("");
        let b = Document::from_text("");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_from_file_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Button.tsx");
        std::fs::write(&path, "export const b = cn(\"px-2\");").unwrap();

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.name(), "Button.tsx");
        assert_eq!(doc.buffer().len_bytes(), 28);
    }

    #[test]
    fn test_untitled() {
        let doc = Document::from_text("<p class=\"m-1\">");
        assert_eq!(doc.name(), "Untitled");
        assert_eq!(doc.buffer().text(), "<p class=\"m-1\">");
    }
}
