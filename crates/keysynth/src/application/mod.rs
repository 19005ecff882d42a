//! Application layer use cases for keysynth.
//!
//! # What use cases are there?
//!
//! - **`type_text`** – The [`type_text::EventSequencer`]: resolves key names
//!   and text against a shared layout and emits correctly bracketed, spaced
//!   key events through a [`type_text::KeyEventSink`].  The sink is injected
//!   at construction time, so this layer never touches an OS API.
//!
//! - **`dispatch_chat`** – Drives a game's chat box (close overlay, open
//!   chat, type, submit, close) on top of the sequencer.

pub mod dispatch_chat;
pub mod type_text;
