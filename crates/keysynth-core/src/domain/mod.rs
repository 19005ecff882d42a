//! Domain entities for keysynth.
//!
//! This module contains the resolution rules with no infrastructure
//! dependencies: nothing here sleeps, posts events, or touches the OS.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application holds the rules that make the
//! system what it is.  Here that is the question "which physical key, with
//! which modifiers, produces this character under this layout?".  Outer
//! layers (the event sequencer, the platform sinks, the CLI) depend on the
//! domain, but the domain never depends on them, so it can be tested on any
//! machine without a keyboard or a display.

/// Layout tables and the character resolver.
///
/// See [`layout::LayoutResolver`] for the main type.
pub mod layout;

/// Per-locale patches applied to the default table.
pub mod locale;
