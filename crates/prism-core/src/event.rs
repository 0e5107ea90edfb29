//! Notifications for status indicators and other observers.
//!
//! Events go out on a `tokio::sync::broadcast` channel. Sending never blocks
//! and never fails when nobody listens; a slow receiver skips ahead instead
//! of holding up the scanner.

use prism_syntax::HighlightMode;
use tokio::sync::broadcast;

use crate::document::DocumentId;

/// What the integration reports to the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrismEvent {
    /// A document was opened
    DocumentOpened(DocumentId),
    /// A document became the active one
    DocumentActivated(DocumentId),
    /// A document was closed
    DocumentClosed(DocumentId),

    /// A scan was painted; counts are in `SpanCategory::ALL` order
    HighlightsApplied {
        document: DocumentId,
        counts: [usize; 4],
    },
    /// All painting was removed
    HighlightsCleared,

    /// Enabled flag or mode changed
    StatusChanged(Status),
}

/// The on/off state and mode, as shown in a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub enabled: bool,
    pub mode: HighlightMode,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.enabled {
            write!(f, "Prism · {}", self.mode)
        } else {
            f.write_str("Prism · Off")
        }
    }
}

/// Event bus for broadcasting [`PrismEvent`]s.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PrismEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        // Capacity of 64 events in the buffer
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: PrismEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<PrismEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Async helper that skips over lag.
///
/// ```ignore
/// let mut events = EventHandler::new(session.subscribe());
/// tokio::spawn(async move {
///     while let Some(event) = events.next().await {
///         if let PrismEvent::StatusChanged(status) = event {
///             status_bar.set_text(status.to_string());
///         }
///     }
/// });
/// ```
pub struct EventHandler {
    receiver: broadcast::Receiver<PrismEvent>,
}

impl EventHandler {
    pub fn new(receiver: broadcast::Receiver<PrismEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event. `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<PrismEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
