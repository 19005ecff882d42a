//! EventSequencer: turns key names and text into timed key events.
//!
//! The sequencer resolves each character against a shared
//! [`LayoutResolver`] and emits the resulting events through a
//! [`KeyEventSink`].  The sink is the platform boundary; everything in this
//! module is platform-independent.
//!
//! # Event order
//!
//! A tap of one character emits, strictly in this order:
//!
//! ```text
//! shift down?  option down?  key down  key up  option up?  shift up?
//! ```
//!
//! Typing a string is a series of independent taps.  Modifiers are resolved
//! afresh for every character and never stay down between characters.
//!
//! # Timing
//!
//! Every event is preceded and followed by the configured key delay.  OS
//! input queues drop or reorder events that arrive back to back, so the
//! spacing also applies before the first and after the last event of a call.
//! The waits block the calling thread; run long texts on a worker (see
//! `infrastructure::worker`).
//!
//! # Failures
//!
//! Resolution never fails.  A sink error aborts the call at once: no retry
//! and no attempt to release keys that are already down, because a repeated
//! key event is a duplicate keystroke.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use keysynth_core::{LayoutResolver, PhysicalKeyCode, ResolvedKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Default spacing between consecutive key events.
pub const DEFAULT_KEY_DELAY: Duration = Duration::from_millis(10);

/// Error type for event sink operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("key code {0} cannot be posted by this backend")]
    InvalidKeyCode(PhysicalKeyCode),
    #[error("not permitted to post keyboard events")]
    PermissionDenied,
}

/// Error type for sequencing operations.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("unknown key name: {0:?}")]
    UnknownKey(String),
    #[error("no layout mapping for {character:?} at character {index}")]
    UnmappedCharacter { character: char, index: usize },
    #[error("event sink failed: {0}")]
    Sink(#[from] SinkError),
    #[error("typing interrupted after {typed} character(s): {source}")]
    Interrupted {
        typed: usize,
        #[source]
        source: SinkError,
    },
}

/// Destination of synthesized key events.
///
/// Implementations post one event to the OS and return.  Any closure of the
/// right shape is a sink, which keeps tests and ad-hoc hosts short.
#[cfg_attr(test, mockall::automock)]
pub trait KeyEventSink: Send + Sync {
    /// Posts a key-down (`pressed == true`) or key-up event.
    fn emit_key(&self, code: PhysicalKeyCode, pressed: bool) -> Result<(), SinkError>;
}

impl<F> KeyEventSink for F
where
    F: Fn(PhysicalKeyCode, bool) -> Result<(), SinkError> + Send + Sync,
{
    fn emit_key(&self, code: PhysicalKeyCode, pressed: bool) -> Result<(), SinkError> {
        self(code, pressed)
    }
}

/// One emitted event, as recorded by test and dry-run sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyEvent {
    pub code: PhysicalKeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(code: impl Into<PhysicalKeyCode>) -> Self {
        Self {
            code: code.into(),
            pressed: true,
        }
    }

    pub fn up(code: impl Into<PhysicalKeyCode>) -> Self {
        Self {
            code: code.into(),
            pressed: false,
        }
    }
}

/// What to do with characters the layout cannot map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Type the raw code point and log a warning.
    #[default]
    Permissive,
    /// Refuse the whole text before emitting anything.
    Reject,
}

/// Result of a typing call that ran to its end or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOutcome {
    Completed { typed: usize },
    Cancelled { typed: usize },
}

impl TypeOutcome {
    /// Number of characters fully typed.
    pub fn typed(&self) -> usize {
        match *self {
            TypeOutcome::Completed { typed } | TypeOutcome::Cancelled { typed } => typed,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TypeOutcome::Cancelled { .. })
    }
}

/// A key left down by [`EventSequencer::press_and_hold`].
///
/// Remembers which modifiers went down with it so that
/// [`EventSequencer::release`] can bring them back up.
#[derive(Debug)]
#[must_use = "the key stays down until passed to `EventSequencer::release`"]
pub struct HeldKey {
    key: ResolvedKey,
}

impl HeldKey {
    pub fn key(&self) -> &ResolvedKey {
        &self.key
    }
}

/// Emits correctly bracketed and spaced key events for keys and text.
pub struct EventSequencer {
    resolver: Arc<LayoutResolver>,
    sink: Arc<dyn KeyEventSink>,
    key_delay: Duration,
    fallback: FallbackPolicy,
}

impl EventSequencer {
    /// Creates a sequencer with the default key delay and a permissive
    /// fallback policy.
    pub fn new(resolver: Arc<LayoutResolver>, sink: Arc<dyn KeyEventSink>) -> Self {
        Self {
            resolver,
            sink,
            key_delay: DEFAULT_KEY_DELAY,
            fallback: FallbackPolicy::default(),
        }
    }

    pub fn with_key_delay(mut self, key_delay: Duration) -> Self {
        self.key_delay = key_delay;
        self
    }

    pub fn with_fallback_policy(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn resolver(&self) -> &LayoutResolver {
        &self.resolver
    }

    pub fn key_delay(&self) -> Duration {
        self.key_delay
    }

    /// Presses the modifiers `key` needs, then `key`, and leaves it down.
    ///
    /// # Errors
    ///
    /// [`SequenceError::UnknownKey`] if the name does not resolve (nothing is
    /// emitted), [`SequenceError::Sink`] if an event cannot be posted.
    pub fn press_and_hold(&self, key: &str) -> Result<HeldKey, SequenceError> {
        let resolved = self.resolve_key(key)?;
        Ok(self.hold(resolved)?)
    }

    /// Character variant of [`Self::press_and_hold`].
    pub fn press_and_hold_char(&self, c: char) -> Result<HeldKey, SequenceError> {
        let resolved = self.resolve_char(c, 0)?;
        Ok(self.hold(resolved)?)
    }

    /// Releases a held key, then the modifiers it was pressed with.
    pub fn release(&self, held: HeldKey) -> Result<(), SequenceError> {
        Ok(self.unhold(held)?)
    }

    /// Presses and releases a named key or single character.
    pub fn tap(&self, key: &str) -> Result<(), SequenceError> {
        let resolved = self.resolve_key(key)?;
        debug!(key, code = %resolved.code, "tap");
        Ok(self.tap_resolved(resolved)?)
    }

    /// Presses and releases the key that produces `c`.
    pub fn tap_char(&self, c: char) -> Result<(), SequenceError> {
        let resolved = self.resolve_char(c, 0)?;
        Ok(self.tap_resolved(resolved)?)
    }

    /// Types `text` one character at a time.
    ///
    /// Returns the number of characters typed.
    ///
    /// # Errors
    ///
    /// [`SequenceError::UnmappedCharacter`] under [`FallbackPolicy::Reject`]
    /// (checked before anything is emitted), or
    /// [`SequenceError::Interrupted`] with the count of fully typed
    /// characters when the sink fails.
    pub fn type_text(&self, text: &str) -> Result<usize, SequenceError> {
        let never = AtomicBool::new(false);
        self.type_text_until(text, &never).map(|outcome| outcome.typed())
    }

    /// Like [`Self::type_text`], but stops at the next character boundary
    /// once `cancel` is set.
    pub fn type_text_until(
        &self,
        text: &str,
        cancel: &AtomicBool,
    ) -> Result<TypeOutcome, SequenceError> {
        let keys = self.resolve_text(text)?;

        debug!(chars = keys.len(), "typing text");

        let mut typed = 0;
        for key in keys {
            if cancel.load(Ordering::Relaxed) {
                debug!(typed, "typing cancelled");
                return Ok(TypeOutcome::Cancelled { typed });
            }
            self.tap_resolved(key)
                .map_err(|source| SequenceError::Interrupted { typed, source })?;
            typed += 1;
        }

        Ok(TypeOutcome::Completed { typed })
    }

    /// Resolves every character of `text` under the fallback policy
    /// without emitting anything.
    ///
    /// # Errors
    ///
    /// [`SequenceError::UnmappedCharacter`] for the first unmapped character
    /// under [`FallbackPolicy::Reject`].
    pub fn resolve_text(&self, text: &str) -> Result<Vec<ResolvedKey>, SequenceError> {
        text.chars()
            .enumerate()
            .map(|(index, c)| self.resolve_char(c, index))
            .collect()
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn resolve_key(&self, name: &str) -> Result<ResolvedKey, SequenceError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return self.resolve_char(c, 0);
        }
        self.resolver
            .resolve_key(name)
            .ok_or_else(|| SequenceError::UnknownKey(name.to_string()))
    }

    fn resolve_char(&self, c: char, index: usize) -> Result<ResolvedKey, SequenceError> {
        let key = self.resolver.resolve(c);
        if key.is_fallback() {
            if self.fallback == FallbackPolicy::Reject {
                return Err(SequenceError::UnmappedCharacter { character: c, index });
            }
            warn!(character = ?c, code = %key.code, "no layout mapping, using raw code point");
        }
        Ok(key)
    }

    fn tap_resolved(&self, key: ResolvedKey) -> Result<(), SinkError> {
        let held = self.hold(key)?;
        self.unhold(held)
    }

    fn hold(&self, key: ResolvedKey) -> Result<HeldKey, SinkError> {
        for modifier in key.modifiers() {
            self.emit(self.resolver.modifier_code(modifier), true)?;
        }
        self.emit(key.code, true)?;
        Ok(HeldKey { key })
    }

    fn unhold(&self, held: HeldKey) -> Result<(), SinkError> {
        let key = held.key;
        self.emit(key.code, false)?;
        for modifier in key.modifiers().rev() {
            self.emit(self.resolver.modifier_code(modifier), false)?;
        }
        Ok(())
    }

    fn emit(&self, code: PhysicalKeyCode, pressed: bool) -> Result<(), SinkError> {
        self.pause();
        trace!(%code, pressed, "key event");
        self.sink.emit_key(code, pressed)?;
        self.pause();
        Ok(())
    }

    fn pause(&self) {
        if !self.key_delay.is_zero() {
            thread::sleep(self.key_delay);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
