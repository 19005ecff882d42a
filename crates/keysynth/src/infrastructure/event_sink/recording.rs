//! In-memory event sink for tests.
//!
//! # Why a recording sink?
//!
//! The real sink posts events into the OS input stream, which:
//!
//! - Requires a desktop session and, on macOS, Accessibility permission.
//! - Actually types into whatever window has focus on the test machine.
//! - Cannot be observed from Rust test code.
//!
//! [`RecordingSink`] replaces all of that with a `Mutex<Vec<KeyEvent>>` so
//! test assertions can inspect exactly what was emitted and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(RecordingSink::new());
//! let sequencer = EventSequencer::new(resolver, Arc::clone(&sink) as Arc<dyn KeyEventSink>)
//!     .with_key_delay(Duration::ZERO);
//!
//! sequencer.tap_char('!').unwrap();
//!
//! assert_eq!(sink.events().len(), 4);
//! ```
//!
//! # Injecting failures
//!
//! [`RecordingSink::failing_after`] builds a sink that accepts `n` events and
//! rejects every later one with [`SinkError::Platform`].

use std::sync::Mutex;

use keysynth_core::PhysicalKeyCode;

use crate::application::type_text::{KeyEvent, KeyEventSink, SinkError};

/// A sink that records every accepted event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<KeyEvent>>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `accepted` events, then fails.
    pub fn failing_after(accepted: usize) -> Self {
        Self {
            fail_after: Some(accepted),
            ..Self::default()
        }
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<KeyEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Returns `true` if every key that went down also came back up.
    pub fn is_balanced(&self) -> bool {
        let mut down = Vec::new();
        for event in self.events() {
            if event.pressed {
                down.push(event.code);
            } else if let Some(pos) = down.iter().rposition(|&c| c == event.code) {
                down.remove(pos);
            } else {
                return false;
            }
        }
        down.is_empty()
    }
}

impl KeyEventSink for RecordingSink {
    fn emit_key(&self, code: PhysicalKeyCode, pressed: bool) -> Result<(), SinkError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| SinkError::Platform("recording sink poisoned".into()))?;
        if self.fail_after.is_some_and(|limit| events.len() >= limit) {
            return Err(SinkError::Platform("injected failure".into()));
        }
        events.push(KeyEvent { code, pressed });
        Ok(())
    }
}
