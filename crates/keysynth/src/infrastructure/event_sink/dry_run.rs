//! Dry-run event sink: logs events instead of posting them.
//!
//! Used by `--dry-run` and on platforms without a native sink, so the whole
//! pipeline (resolution, bracketing, timing) can be watched with
//! `RUST_LOG=keysynth=debug` without typing into a live window.

use std::sync::atomic::{AtomicUsize, Ordering};

use keysynth_core::PhysicalKeyCode;
use tracing::debug;

use crate::application::type_text::{KeyEventSink, SinkError};

#[derive(Debug, Default)]
pub struct DryRunSink {
    posted: AtomicUsize,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events that would have been posted.
    pub fn posted(&self) -> usize {
        self.posted.load(Ordering::Relaxed)
    }
}

impl KeyEventSink for DryRunSink {
    fn emit_key(&self, code: PhysicalKeyCode, pressed: bool) -> Result<(), SinkError> {
        let n = self.posted.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(n, %code, state = if pressed { "down" } else { "up" }, "dry-run key event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_events() {
        let sink = DryRunSink::new();

        sink.emit_key(PhysicalKeyCode(0x24), true).unwrap();
        sink.emit_key(PhysicalKeyCode(0x24), false).unwrap();

        assert_eq!(sink.posted(), 2);
    }
}
