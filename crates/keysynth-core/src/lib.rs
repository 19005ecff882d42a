//! # keysynth-core
//!
//! Layout resolution for the keysynth virtual keyboard: key code tables,
//! the character resolver, and locale patches.
//!
//! This crate has zero dependencies on OS APIs.  It decides *which* physical
//! key and modifiers produce a character; the `keysynth` crate decides *when*
//! to send the corresponding events and hands them to a platform sink.
//!
//! - **`keymap`** – [`PhysicalKeyCode`] and the default macOS ANSI tables.
//! - **`domain`** – [`LayoutTable`], [`LayoutResolver`] and the pure
//!   [`apply_patch`] function for locale patches.

pub mod domain;
pub mod keymap;

pub use domain::layout::{KeySource, LayoutResolver, LayoutTable, Modifier, ResolvedKey};
pub use domain::locale::{apply_patch, Locale, LocalePatch, PatchOp};
pub use keymap::PhysicalKeyCode;
