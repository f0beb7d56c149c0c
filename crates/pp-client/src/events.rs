//! Outcome notifications for call objects.
//!
//! Each call object owns a broadcast channel. Listeners subscribe before
//! calling and receive one event per finished `call()`.

use tokio::sync::broadcast;
use tracing::debug;

use crate::error::ErrorInfo;

/// Buffered events per subscriber before it starts lagging.
const EVENT_CAPACITY: usize = 16;

/// Outcome of one `call()`.
#[derive(Debug, Clone)]
pub enum CallEvent {
    /// The call completed and its result was hydrated.
    Succeeded,
    /// The call failed; carries the recorded error.
    Failed(ErrorInfo),
}

impl CallEvent {
    pub fn is_success(&self) -> bool {
        matches!(self, CallEvent::Succeeded)
    }

    /// The error carried by a `Failed` event.
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            CallEvent::Failed(err) => Some(err),
            CallEvent::Succeeded => None,
        }
    }
}

/// Sender side of a call object's event channel.
#[derive(Debug, Clone)]
pub struct CallEvents {
    tx: broadcast::Sender<CallEvent>,
}

impl Default for CallEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl CallEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn emit(&self, event: CallEvent) {
        match self.tx.send(event) {
            Ok(receivers) => debug!(receivers, "Call event published"),
            Err(_) => debug!("Call event dropped, no subscribers"),
        }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.tx.subscribe()
    }
}
