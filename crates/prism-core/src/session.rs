//! The host-facing wrapper around the scanner.
//!
//! A [`Session`] reacts to the events an editor reports (document opened,
//! active buffer switched, text edited, cursor moved, settings changed) by
//! re-running [`prism_syntax::scan`] on the active document and handing the
//! result to the [`OverlayManager`]. Every scan starts from scratch; the only
//! state carried between scans is the live handle set.

use prism_syntax::{HighlightMode, HighlightResult, scan};
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;
use tokio::sync::broadcast;

use crate::colors::PrismColors;
use crate::config::PrismConfig;
use crate::document::{Document, DocumentId};
use crate::event::{EventBus, PrismEvent, Status};
use crate::overlay::{OverlayHost, OverlayManager};
use crate::{CoreError, CoreResult};

/// Documents, settings and the paint handles of one host.
pub struct Session<H: OverlayHost> {
    config: PrismConfig,

    /// Resolved once per config change
    colors: PrismColors,

    documents: HashMap<DocumentId, Document>,
    active: Option<DocumentId>,

    host: H,
    overlay: OverlayManager<H>,
    events: EventBus,
}

impl<H: OverlayHost> Session<H> {
    pub fn new(host: H, config: PrismConfig) -> Self {
        Self {
            colors: config.resolved_colors(),
            config,
            documents: HashMap::new(),
            active: None,
            host,
            overlay: OverlayManager::new(),
            events: EventBus::new(),
        }
    }

    // ==================== Documents ====================

    /// Opens an untitled document, makes it active and scans it.
    pub fn open(&mut self, text: &str) -> DocumentId {
        self.add_document(Document::from_text(text))
    }

    /// Opens a file, makes it active and scans it.
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> CoreResult<DocumentId> {
        Ok(self.add_document(Document::from_file(path)?))
    }

    fn add_document(&mut self, document: Document) -> DocumentId {
        let id = document.id();
        tracing::debug!("Opened {} as {}", document.name(), id);
        self.documents.insert(id, document);
        self.events.emit(PrismEvent::DocumentOpened(id));
        self.set_active(id);
        id
    }

    /// Switches the active document and rescans.
    pub fn activate(&mut self, id: DocumentId) -> CoreResult<()> {
        if !self.documents.contains_key(&id) {
            return Err(CoreError::DocumentNotFound(id));
        }
        self.set_active(id);
        Ok(())
    }

    fn set_active(&mut self, id: DocumentId) {
        self.active = Some(id);
        self.events.emit(PrismEvent::DocumentActivated(id));
        self.rescan();
    }

    /// Closes a document. Closing the active one clears all painting.
    pub fn close(&mut self, id: DocumentId) -> CoreResult<()> {
        self.documents
            .remove(&id)
            .ok_or(CoreError::DocumentNotFound(id))?;
        self.events.emit(PrismEvent::DocumentClosed(id));

        if self.active == Some(id) {
            self.active = None;
            self.clear();
        }
        Ok(())
    }

    /// Replaces a character range of a document's text.
    ///
    /// Only edits to the active document trigger a scan.
    pub fn edit(&mut self, id: DocumentId, range: Range<usize>, replacement: &str) -> CoreResult<()> {
        self.document_mut(id)?.buffer_mut().replace(range, replacement)?;
        if self.active == Some(id) {
            self.rescan();
        }
        Ok(())
    }

    /// Moves a document's cursor to a byte offset.
    ///
    /// Cursor movement only changes what is painted in cursor mode.
    pub fn move_cursor(&mut self, id: DocumentId, byte_offset: usize) -> CoreResult<()> {
        self.document_mut(id)?.buffer_mut().set_cursor(byte_offset)?;
        if self.active == Some(id) && self.config.highlight_mode == HighlightMode::Cursor {
            self.rescan();
        }
        Ok(())
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    fn document_mut(&mut self, id: DocumentId) -> CoreResult<&mut Document> {
        self.documents
            .get_mut(&id)
            .ok_or(CoreError::DocumentNotFound(id))
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active.and_then(|id| self.documents.get(&id))
    }

    // ==================== Configuration ====================

    /// Applies new settings.
    ///
    /// Disabling clears all painting. Otherwise the active document is
    /// rescanned, which recreates handles if the colors changed.
    pub fn set_config(&mut self, config: PrismConfig) {
        let status_changed = config.status() != self.config.status();
        self.colors = config.resolved_colors();
        self.config = config;

        if status_changed {
            tracing::info!("{}", self.status());
            self.events.emit(PrismEvent::StatusChanged(self.status()));
        }
        self.rescan();
    }

    /// Flips the enabled flag. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        let mut config = self.config.clone();
        config.enabled = !config.enabled;
        self.set_config(config);
        self.config.enabled
    }

    pub fn set_mode(&mut self, mode: HighlightMode) {
        let mut config = self.config.clone();
        config.highlight_mode = mode;
        self.set_config(config);
    }

    /// Switches the color preset. Unknown names fall back to the default.
    pub fn set_preset(&mut self, name: &str) {
        let mut config = self.config.clone();
        config.color_preset = name.to_string();
        self.set_config(config);
    }

    pub fn config(&self) -> &PrismConfig {
        &self.config
    }

    pub fn colors(&self) -> &PrismColors {
        &self.colors
    }

    pub fn status(&self) -> Status {
        self.config.status()
    }

    // ==================== Scanning ====================

    /// Scans the active document and paints the result.
    ///
    /// Returns `None`, after clearing any painting, when highlighting is
    /// disabled or no document is active.
    pub fn rescan(&mut self) -> Option<HighlightResult> {
        let active = self.active.filter(|_| self.config.enabled);
        let Some(document) = active.and_then(|id| self.documents.get(&id)) else {
            self.clear();
            return None;
        };

        let buffer = document.buffer();
        let result = scan(
            &buffer.text(),
            Some(buffer.cursor_offset()),
            self.config.highlight_mode,
        );
        let id = document.id();

        self.overlay.apply(&mut self.host, &self.colors, &result);
        self.events.emit(PrismEvent::HighlightsApplied {
            document: id,
            counts: result.counts(),
        });
        Some(result)
    }

    fn clear(&mut self) {
        if self.overlay.clear(&mut self.host) {
            self.events.emit(PrismEvent::HighlightsCleared);
        }
    }

    /// Removes all painting and releases the host's handles.
    ///
    /// Also runs on drop; calling it more than once is harmless.
    pub fn shutdown(&mut self) {
        self.clear();
    }

    // ==================== Host & Events ====================

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// True while paint handles exist.
    pub fn is_painting(&self) -> bool {
        self.overlay.is_live()
    }

    /// Subscribes to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<PrismEvent> {
        self.events.subscribe()
    }
}

impl<H: OverlayHost> Drop for Session<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
