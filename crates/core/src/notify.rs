//! # Notification Sink
//!
//! User-facing success/error messages. The engine routes every remote-call
//! outcome through exactly one notification; how the message is presented
//! (dialog, toast, terminal line) is the sink's business.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Kind of user-facing notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Success,
    Error,
}

/// Surface for user-facing messages.
pub trait NotificationSink: Send + Sync {
    /// Deliver one message to the user.
    fn notify(&self, kind: NoteKind, message: &str);
}

/// Sink that routes notifications into the tracing pipeline.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, kind: NoteKind, message: &str) {
        match kind {
            NoteKind::Success => tracing::info!(target: "gamedex::notify", "{message}"),
            NoteKind::Error => tracing::warn!(target: "gamedex::notify", "{message}"),
        }
    }
}

/// Sink that stores every notification, for inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notes: Mutex<Vec<(NoteKind, String)>>,
}

impl RecordingSink {
    /// Snapshot of everything notified so far, in order.
    pub fn notes(&self) -> Vec<(NoteKind, String)> {
        self.notes.lock().expect("sink lock poisoned").clone()
    }

    /// True when at least one `Error` note was delivered.
    pub fn saw_error(&self) -> bool {
        self.notes().iter().any(|(k, _)| *k == NoteKind::Error)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, kind: NoteKind, message: &str) {
        self.notes
            .lock()
            .expect("sink lock poisoned")
            .push((kind, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::default();
        sink.notify(NoteKind::Success, "first");
        sink.notify(NoteKind::Error, "second");

        let notes = sink.notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], (NoteKind::Success, "first".to_string()));
        assert!(sink.saw_error());
    }
}
