//! Locale patches for the default layout.
//!
//! A [`LocalePatch`] is a fixed list of [`PatchOp`]s describing how a
//! national keyboard differs from the ANSI default.  [`apply_patch`] is a
//! pure function: it returns a new [`LayoutTable`] and leaves its input alone.
//!
//! Patches only cover the differences that matter for typing chat text.
//! They are not a complete description of the national layout.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layout::LayoutTable;

/// A single declarative change to a [`LayoutTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOp {
    /// Exchange the physical codes of two named keys.
    SwapKeys(&'static str, &'static str),
    /// `symbol` is typed as shift + `base`.
    Shifted(char, char),
    /// `symbol` is typed as option + `base`.
    Optioned(char, char),
    /// `symbol` needs no modifier and sits on the key named `same_as`.
    Plain {
        symbol: char,
        same_as: &'static str,
    },
}

/// A named, fixed set of changes for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalePatch {
    pub name: &'static str,
    pub ops: &'static [PatchOp],
}

/// German (Apple) keyboard.
///
/// The ANSI bracket keys carry `ü` and `+` here, so all four brackets move
/// to option + digit.
pub const GERMAN: LocalePatch = LocalePatch {
    name: "de",
    ops: &[
        PatchOp::SwapKeys("y", "z"),
        PatchOp::Shifted('&', '6'),
        PatchOp::Shifted('"', '2'),
        PatchOp::Plain {
            symbol: '#',
            same_as: "\\",
        },
        PatchOp::Optioned('[', '5'),
        PatchOp::Optioned(']', '6'),
        PatchOp::Optioned('{', '8'),
        PatchOp::Optioned('}', '9'),
    ],
};

/// Locales with a known patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    German,
}

impl Locale {
    /// Maps a locale identifier to a patch.
    ///
    /// Only the primary language subtag is significant, so `de`, `DE`,
    /// `de-DE` and `de_AT` all select [`Locale::German`].  Unknown
    /// identifiers return `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        let primary = id.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "de" => Some(Locale::German),
            _ => {
                debug!(locale = id, "no patch for locale, using default layout");
                None
            }
        }
    }

    /// The fixed patch applied for this locale.
    pub fn patch(self) -> &'static LocalePatch {
        match self {
            Locale::German => &GERMAN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.patch().name)
    }
}

/// Returns a copy of `base` with every op of `patch` applied in order.
///
/// Ops that reference a key missing from `base` are skipped.  Moving a
/// symbol into one modifier set always removes it from the other.
pub fn apply_patch(base: &LayoutTable, patch: &LocalePatch) -> LayoutTable {
    let mut table = base.clone();

    for op in patch.ops {
        match *op {
            PatchOp::SwapKeys(a, b) => {
                if let (Some(code_a), Some(code_b)) = (table.base_code(a), table.base_code(b)) {
                    table.base_key_codes.insert(a.to_string(), code_b);
                    table.base_key_codes.insert(b.to_string(), code_a);
                }
            }
            PatchOp::Shifted(symbol, base) => {
                table.option_symbols.remove(&symbol);
                table.shifted_symbols.insert(symbol, base);
            }
            PatchOp::Optioned(symbol, base) => {
                table.shifted_symbols.remove(&symbol);
                table.option_symbols.insert(symbol, base);
            }
            PatchOp::Plain { symbol, same_as } => {
                table.shifted_symbols.remove(&symbol);
                table.option_symbols.remove(&symbol);
                if let Some(code) = table.base_code(same_as) {
                    table.base_key_codes.insert(symbol.to_string(), code);
                }
            }
        }
    }

    debug!(patch = patch.name, ops = patch.ops.len(), "applied locale patch");
    table
}

// ── Tests ─────────────────────────────────────────────────────────────────────
