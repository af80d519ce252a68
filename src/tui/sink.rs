//! Completion sink: AI worker threads push resolution events, the TUI loop drains them.

use std::sync::Mutex;

use crate::controller::Event;

/// Collects resolution events for the event loop (thread-safe).
#[derive(Debug, Default)]
pub struct CompletionSink {
    pending: Mutex<Vec<Event>>,
}

impl CompletionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event from a worker.
    pub fn push(&self, event: Event) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&self) -> Vec<Event> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }
}
