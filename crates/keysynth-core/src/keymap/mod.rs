//! Physical key codes and the default key tables.
//!
//! A [`PhysicalKeyCode`] names a key *position*, not the character it
//! produces.  Which character appears on screen depends on the active
//! keyboard layout and on the modifier keys held down at the time.
//!
//! # Why position codes? (for beginners)
//!
//! On a US keyboard the key to the right of `T` prints `y`.  On a German
//! keyboard the very same physical key prints `z`.  The operating system
//! receives the same position code in both cases and applies the layout
//! afterwards.  A synthesizer that wants to *type* a `z` therefore has to
//! know which position produces `z` under the user's layout, which is what
//! the [`crate::domain`] resolver and its locale patches are for.

pub mod macos_cg;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a physical key position.
///
/// Values from the built-in tables are macOS `CGKeyCode`s and always fit in
/// a `u16`.  The type is wider so that the raw code-point fallback of the
/// resolver can carry any Unicode scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalKeyCode(pub u32);

impl PhysicalKeyCode {
    /// Returns the raw numeric value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the code as a `CGKeyCode`, or `None` when it does not fit.
    pub fn as_cgkeycode(self) -> Option<u16> {
        u16::try_from(self.0).ok()
    }
}

impl From<u16> for PhysicalKeyCode {
    fn from(code: u16) -> Self {
        Self(u32::from(code))
    }
}

impl fmt::Display for PhysicalKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}
