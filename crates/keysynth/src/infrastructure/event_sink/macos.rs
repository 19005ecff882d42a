//! macOS CoreGraphics event sink.
//!
//! Uses `CGEventCreateKeyboardEvent` and `CGEventPost` (through the
//! `core-graphics` crate) to inject key events at the `kCGHIDEventTap` level.
//!
//! # What is CoreGraphics event injection? (for beginners)
//!
//! `CGEventPost` injects a synthesized event into the hardware input stream
//! at the HID (Human Interface Device) level, the same level as a physical
//! keyboard.  Applications cannot tell these events apart from real typing.
//!
//! The sequence for one key event is:
//!
//! 1. `CGEventSourceCreate(kCGEventSourceStateHIDSystemState)`: an event
//!    source that mirrors hardware state, so a posted shift-down really
//!    changes the modifier state seen by the next key event.
//! 2. `CGEventCreateKeyboardEvent(source, cgkeycode, key_down)`.
//! 3. `CGEventPost(kCGHIDEventTap, event)`.
//!
//! The `core-graphics` wrappers release the CoreFoundation objects on drop.
//!
//! # Accessibility permission
//!
//! Posting at `kCGHIDEventTap` requires the **Accessibility** permission
//! (System Settings → Privacy & Security → Accessibility).  Without it the
//! post silently does nothing, so [`MacosEventSink::new`] checks
//! `AXIsProcessTrusted` up front and refuses to build a sink that would drop
//! every keystroke.

#![cfg(target_os = "macos")]

use core_graphics::{
    event::{CGEvent, CGEventTapLocation},
    event_source::{CGEventSource, CGEventSourceStateID},
};
use keysynth_core::PhysicalKeyCode;

use crate::application::type_text::{KeyEventSink, SinkError};

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> u8;
}

/// Posts key events into the macOS HID event stream.
pub struct MacosEventSink {
    source: CGEventSource,
}

// SAFETY: CGEventSource is a CoreFoundation object.  Retain and release are
// thread-safe, and the sink only reads from the source when creating events.
unsafe impl Send for MacosEventSink {}
unsafe impl Sync for MacosEventSink {}

impl MacosEventSink {
    /// Creates a sink after checking for Accessibility permission.
    ///
    /// # Errors
    ///
    /// [`SinkError::PermissionDenied`] if the process is not trusted, or
    /// [`SinkError::Platform`] if no event source can be created.
    pub fn new() -> Result<Self, SinkError> {
        // SAFETY: AXIsProcessTrusted takes no arguments and only reads the
        // TCC database for the current process.
        if unsafe { AXIsProcessTrusted() } == 0 {
            return Err(SinkError::PermissionDenied);
        }
        Ok(Self {
            source: event_source()?,
        })
    }
}

impl KeyEventSink for MacosEventSink {
    fn emit_key(&self, code: PhysicalKeyCode, pressed: bool) -> Result<(), SinkError> {
        let keycode = code.as_cgkeycode().ok_or(SinkError::InvalidKeyCode(code))?;
        let event = CGEvent::new_keyboard_event(self.source.clone(), keycode, pressed)
            .map_err(|()| SinkError::Platform(format!("could not create key event for {code}")))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }
}

fn event_source() -> Result<CGEventSource, SinkError> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|()| SinkError::Platform("could not create CGEventSource".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_sink_can_be_shared_across_threads() {
        assert_send_sync::<MacosEventSink>();
    }
}
