//! keysynth library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does keysynth do? (for beginners)
//!
//! keysynth types text into whatever window has keyboard focus by posting
//! synthetic key events, exactly as if somebody were pressing physical keys.
//! It is built for driving a game's chat box: close the pause overlay, open
//! chat, type a command, press enter.
//!
//! Typing a character is harder than it sounds.  The OS event API takes a
//! *physical key* plus modifiers, not a character, and which key produces
//! `&` or `z` depends on the user's keyboard layout.  So the library:
//!
//! 1. Builds a layout table for the user's locale (`keysynth_core`).
//! 2. Resolves each character to a physical key plus Shift/Option.
//! 3. Emits the modifier and key presses in a strict order, spaced by a
//!    small delay so the OS input queue keeps them in order
//!    (`application::type_text`).
//! 4. Optionally wraps the text in the chat key macro
//!    (`application::dispatch_chat`).

/// Application layer: typing and chat use cases.
pub mod application;

/// Infrastructure layer: event sinks, configuration, and the typing worker.
pub mod infrastructure;
