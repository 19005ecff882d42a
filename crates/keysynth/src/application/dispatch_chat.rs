//! ChatDispatcher: types chat messages and commands into a game client.
//!
//! A dispatch runs the key macro a player would use by hand:
//!
//! ```text
//! [focus delay] dismiss  open  (message  submit  [message delay])*  dismiss
//! ```
//!
//! With the default keys that is `esc` to close the pause overlay, `t` to
//! open the chat box, `enter` after each message, and `esc` to restore the
//! overlay.  Bringing the game window to the front is the caller's job and
//! must happen before [`ChatDispatcher::dispatch`] is called; the focus delay
//! gives the window manager time to finish.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use thiserror::Error;
use tracing::{debug, info};

use super::type_text::{EventSequencer, FallbackPolicy, SequenceError};

/// A dispatch that stopped because a key could not be sent.
#[derive(Debug, Error)]
#[error("chat dispatch failed after {sent} message(s): {source}")]
pub struct DispatchError {
    /// Messages submitted before the failure.
    pub sent: usize,
    #[source]
    pub source: SequenceError,
}

/// Keys used to drive the chat box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatKeys {
    pub dismiss: String,
    pub open: String,
    pub submit: String,
}

impl Default for ChatKeys {
    fn default() -> Self {
        Self {
            dismiss: "esc".to_string(),
            open: "t".to_string(),
            submit: "enter".to_string(),
        }
    }
}

/// Outcome of a dispatch that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    /// Messages submitted.
    pub sent: usize,
    /// `true` if the cancel flag stopped the dispatch early.
    pub cancelled: bool,
}

/// Runs the chat key macro on top of a shared [`EventSequencer`].
pub struct ChatDispatcher {
    sequencer: Arc<EventSequencer>,
    keys: ChatKeys,
    focus_delay: Duration,
    message_delay: Duration,
}

impl ChatDispatcher {
    pub fn new(sequencer: Arc<EventSequencer>, keys: ChatKeys) -> Self {
        Self {
            sequencer,
            keys,
            focus_delay: Duration::from_millis(100),
            message_delay: Duration::from_millis(100),
        }
    }

    pub fn with_delays(mut self, focus_delay: Duration, message_delay: Duration) -> Self {
        self.focus_delay = focus_delay;
        self.message_delay = message_delay;
        self
    }

    pub fn sequencer(&self) -> &Arc<EventSequencer> {
        &self.sequencer
    }

    /// Types and submits each message in order.
    ///
    /// Cancellation is checked between characters and between messages.  A
    /// message cut short is not submitted, but the dismiss key is still
    /// tapped so the chat box closes and discards it.
    ///
    /// # Errors
    ///
    /// [`DispatchError`] carrying the number of submitted messages.  Under
    /// [`FallbackPolicy::Reject`] all messages are checked first, so an
    /// unmapped character fails the dispatch with `sent == 0` before any key
    /// is pressed.
    pub fn dispatch(
        &self,
        messages: &[String],
        cancel: &AtomicBool,
    ) -> Result<DispatchReport, DispatchError> {
        let mut sent = 0;
        let fail = |sent: usize| move |source: SequenceError| DispatchError { sent, source };

        if self.sequencer.fallback_policy() == FallbackPolicy::Reject {
            for message in messages {
                self.sequencer.resolve_text(message).map_err(fail(0))?;
            }
        }

        pause(self.focus_delay);
        if cancel.load(Ordering::Relaxed) {
            return Ok(DispatchReport {
                sent,
                cancelled: true,
            });
        }

        self.sequencer.tap(&self.keys.dismiss).map_err(fail(sent))?;
        self.sequencer.tap(&self.keys.open).map_err(fail(sent))?;

        let mut cancelled = false;
        for message in messages {
            if cancel.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }

            let outcome = self
                .sequencer
                .type_text_until(message, cancel)
                .map_err(fail(sent))?;
            if outcome.is_cancelled() {
                cancelled = true;
                break;
            }

            self.sequencer.tap(&self.keys.submit).map_err(fail(sent))?;
            sent += 1;
            debug!(sent, chars = outcome.typed(), "chat message submitted");
            pause(self.message_delay);
        }

        self.sequencer.tap(&self.keys.dismiss).map_err(fail(sent))?;

        info!(sent, total = messages.len(), cancelled, "chat dispatch finished");
        Ok(DispatchReport { sent, cancelled })
    }
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::type_text::{KeyEvent, SinkError};
    use keysynth_core::{LayoutResolver, PhysicalKeyCode};
    use std::sync::Mutex;

    const ESC: u16 = 0x35;
    const T: u16 = 0x11;
    const ENTER: u16 = 0x24;

    type Log = Arc<Mutex<Vec<KeyEvent>>>;

    fn make_dispatcher(policy: FallbackPolicy) -> (ChatDispatcher, Log) {
        let log: Log = Arc::default();
        let sink_log = Arc::clone(&log);
        let sink = move |code: PhysicalKeyCode, pressed: bool| -> Result<(), SinkError> {
            sink_log.lock().unwrap().push(KeyEvent { code, pressed });
            Ok(())
        };
        let sequencer = EventSequencer::new(Arc::new(LayoutResolver::new(Some("de"))), Arc::new(sink))
            .with_key_delay(Duration::ZERO)
            .with_fallback_policy(policy);
        let dispatcher = ChatDispatcher::new(Arc::new(sequencer), ChatKeys::default())
            .with_delays(Duration::ZERO, Duration::ZERO);
        (dispatcher, log)
    }

    fn taps(log: &Log) -> Vec<PhysicalKeyCode> {
        log.lock()
            .unwrap()
            .iter()
            .filter(|e| e.pressed && e.code != PhysicalKeyCode(0x38) && e.code != PhysicalKeyCode(0x3A))
            .map(|e| e.code)
            .collect()
    }

    #[test]
    fn test_dispatch_wraps_messages_in_chat_macro() {
        // Arrange
        let (dispatcher, log) = make_dispatcher(FallbackPolicy::Permissive);
        let messages = vec!["hi".to_string()];

        // Act
        let report = dispatcher.dispatch(&messages, &AtomicBool::new(false)).unwrap();

        // Assert
        assert_eq!(report, DispatchReport { sent: 1, cancelled: false });
        assert_eq!(
            taps(&log),
            vec![
                PhysicalKeyCode::from(ESC),
                PhysicalKeyCode::from(T),
                PhysicalKeyCode(0x04), // h
                PhysicalKeyCode(0x22), // i
                PhysicalKeyCode::from(ENTER),
                PhysicalKeyCode::from(ESC),
            ]
        );
    }

    #[test]
    fn test_dispatch_submits_each_message() {
        let (dispatcher, log) = make_dispatcher(FallbackPolicy::Permissive);
        let messages = vec!["/pay Steve 150000".to_string(), "&2gg".to_string()];

        let report = dispatcher.dispatch(&messages, &AtomicBool::new(false)).unwrap();

        assert_eq!(report.sent, 2);
        let enters = taps(&log).into_iter().filter(|&c| c == PhysicalKeyCode::from(ENTER)).count();
        assert_eq!(enters, 2);
    }

    #[test]
    fn test_cancel_before_start_presses_nothing() {
        let (dispatcher, log) = make_dispatcher(FallbackPolicy::Permissive);

        let report = dispatcher
            .dispatch(&["hello".to_string()], &AtomicBool::new(true))
            .unwrap();

        assert_eq!(report, DispatchReport { sent: 0, cancelled: true });
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_mid_message_skips_submit_but_dismisses() {
        // Arrange: raise the cancel flag once 'b' comes back up.
        let cancel = Arc::new(AtomicBool::new(false));
        let log: Log = Arc::default();
        let (sink_cancel, sink_log) = (Arc::clone(&cancel), Arc::clone(&log));
        let b = PhysicalKeyCode(0x0B);
        let sink = move |code: PhysicalKeyCode, pressed: bool| -> Result<(), SinkError> {
            sink_log.lock().unwrap().push(KeyEvent { code, pressed });
            if code == b && !pressed {
                sink_cancel.store(true, Ordering::Relaxed);
            }
            Ok(())
        };
        let sequencer = EventSequencer::new(Arc::new(LayoutResolver::default()), Arc::new(sink))
            .with_key_delay(Duration::ZERO);
        let dispatcher = ChatDispatcher::new(Arc::new(sequencer), ChatKeys::default())
            .with_delays(Duration::ZERO, Duration::ZERO);

        // Act
        let report = dispatcher.dispatch(&["abc".to_string()], &cancel).unwrap();

        // Assert
        assert_eq!(report, DispatchReport { sent: 0, cancelled: true });
        assert_eq!(
            taps(&log),
            vec![
                PhysicalKeyCode::from(ESC),
                PhysicalKeyCode::from(T),
                PhysicalKeyCode(0x00), // a
                b,
                PhysicalKeyCode::from(ESC),
            ]
        );
        assert!(!taps(&log).contains(&PhysicalKeyCode::from(ENTER)));
    }

    #[test]
    fn test_reject_policy_checks_all_messages_first() {
        // Arrange
        let (dispatcher, log) = make_dispatcher(FallbackPolicy::Reject);
        let messages = vec!["fine".to_string(), "not fine €".to_string()];

        // Act
        let err = dispatcher.dispatch(&messages, &AtomicBool::new(false)).unwrap_err();

        // Assert
        assert_eq!(err.sent, 0);
        assert!(matches!(
            err.source,
            SequenceError::UnmappedCharacter { character: '€', .. }
        ));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sink_failure_reports_sent_messages() {
        // Arrange: fail on the first key of the second message ('b').
        let b = PhysicalKeyCode(0x0B);
        let sink = move |code: PhysicalKeyCode, _pressed: bool| -> Result<(), SinkError> {
            if code == b {
                Err(SinkError::Platform("window gone".to_string()))
            } else {
                Ok(())
            }
        };
        let sequencer = EventSequencer::new(Arc::new(LayoutResolver::default()), Arc::new(sink))
            .with_key_delay(Duration::ZERO);
        let dispatcher = ChatDispatcher::new(Arc::new(sequencer), ChatKeys::default())
            .with_delays(Duration::ZERO, Duration::ZERO);

        // Act
        let err = dispatcher
            .dispatch(&["a".to_string(), "b".to_string()], &AtomicBool::new(false))
            .unwrap_err();

        // Assert
        assert_eq!(err.sent, 1);
        assert!(matches!(err.source, SequenceError::Interrupted { typed: 0, .. }));
    }
}
