//! Layout table and character resolution.
//!
//! The [`LayoutResolver`] turns a character into the physical key that
//! produces it plus the modifiers that must be held while pressing it.
//!
//! # Resolution order
//!
//! 1. Upper-case letters need shift and are folded to lower case.
//! 2. Characters in the shifted set need shift and become their base character.
//! 3. Otherwise characters in the option set need option and become their base.
//! 4. The resulting character is looked up in the base key codes.
//! 5. Anything still unknown falls back to its raw code point.
//!
//! The fallback in step 5 keeps resolution total but is almost never the
//! right key on real hardware.  It is flagged as [`KeySource::RawCodePoint`]
//! so callers can log or reject it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::locale::{apply_patch, Locale};
use crate::keymap::{macos_cg, PhysicalKeyCode};

/// Where a [`ResolvedKey`]'s code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// Found in the layout's base key codes.
    Table,
    /// Best-effort guess: the character's code point used as a key code.
    RawCodePoint,
}

/// The modifier keys the resolver can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Shift,
    Option,
}

/// A character or named key resolved against a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedKey {
    /// Physical key to press.
    pub code: PhysicalKeyCode,
    /// Shift must be held while the key is pressed.
    pub needs_shift: bool,
    /// Option must be held while the key is pressed.
    pub needs_option: bool,
    /// Whether `code` came from the table or from the fallback.
    pub source: KeySource,
}

impl ResolvedKey {
    fn plain(code: PhysicalKeyCode) -> Self {
        Self {
            code,
            needs_shift: false,
            needs_option: false,
            source: KeySource::Table,
        }
    }

    /// Returns `true` when the code is a raw code-point guess.
    pub fn is_fallback(&self) -> bool {
        self.source == KeySource::RawCodePoint
    }

    /// Modifiers to press before the key, in press order.
    ///
    /// Release order is the reverse.
    pub fn modifiers(&self) -> impl DoubleEndedIterator<Item = Modifier> {
        let shift = self.needs_shift.then_some(Modifier::Shift);
        let option = self.needs_option.then_some(Modifier::Option);
        shift.into_iter().chain(option)
    }
}

/// The three lookup tables of a keyboard layout.
///
/// A table is built once, optionally patched once (see
/// [`super::locale::apply_patch`]), and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTable {
    pub(crate) base_key_codes: HashMap<String, PhysicalKeyCode>,
    pub(crate) shifted_symbols: HashMap<char, char>,
    pub(crate) option_symbols: HashMap<char, char>,
}

impl LayoutTable {
    /// Builds the default ANSI table.
    pub fn ansi() -> Self {
        Self {
            base_key_codes: macos_cg::DEFAULT_KEY_CODES
                .iter()
                .map(|&(name, code)| (name.to_string(), PhysicalKeyCode::from(code)))
                .collect(),
            shifted_symbols: macos_cg::DEFAULT_SHIFTED_SYMBOLS.iter().copied().collect(),
            option_symbols: macos_cg::DEFAULT_OPTION_SYMBOLS.iter().copied().collect(),
        }
    }

    /// Looks up a key by name (or single-character name).
    pub fn base_code(&self, name: &str) -> Option<PhysicalKeyCode> {
        self.base_key_codes.get(name).copied()
    }

    /// Returns the base character of a symbol that needs shift.
    pub fn shifted_base(&self, symbol: char) -> Option<char> {
        self.shifted_symbols.get(&symbol).copied()
    }

    /// Returns the base character of a symbol that needs option.
    pub fn option_base(&self, symbol: char) -> Option<char> {
        self.option_symbols.get(&symbol).copied()
    }

    /// Iterates over every `(symbol, base)` pair in the shifted set.
    pub fn shifted_symbols(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.shifted_symbols.iter().map(|(&s, &b)| (s, b))
    }

    /// Iterates over every `(symbol, base)` pair in the option set.
    pub fn option_symbols(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.option_symbols.iter().map(|(&s, &b)| (s, b))
    }

    fn char_code(&self, c: char) -> Option<PhysicalKeyCode> {
        let mut buf = [0u8; 4];
        self.base_code(c.encode_utf8(&mut buf))
    }
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Resolves characters and key names against an immutable [`LayoutTable`].
///
/// The resolver holds no mutable state and is `Send + Sync`, so a single
/// instance can be shared by any number of sequencers.
#[derive(Debug, Clone)]
pub struct LayoutResolver {
    table: LayoutTable,
    locale: Option<Locale>,
    shift_code: PhysicalKeyCode,
    option_code: PhysicalKeyCode,
}

impl LayoutResolver {
    /// Builds a resolver over the default table, patched for `locale_id`.
    ///
    /// Unknown or absent locale ids leave the default table untouched.
    pub fn new(locale_id: Option<&str>) -> Self {
        let locale = locale_id.and_then(Locale::from_id);
        let table = match locale {
            Some(locale) => apply_patch(&LayoutTable::ansi(), locale.patch()),
            None => LayoutTable::ansi(),
        };
        let mut resolver = Self::from_table(table);
        resolver.locale = locale;
        resolver
    }

    /// Wraps an already built table.
    pub fn from_table(table: LayoutTable) -> Self {
        let shift_code = table
            .base_code("shift")
            .unwrap_or(PhysicalKeyCode::from(macos_cg::SHIFT));
        let option_code = table
            .base_code("option")
            .unwrap_or(PhysicalKeyCode::from(macos_cg::OPTION));
        Self {
            table,
            locale: None,
            shift_code,
            option_code,
        }
    }

    /// The locale patch applied at construction, if any.
    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    /// The table this resolver looks characters up in.
    pub fn table(&self) -> &LayoutTable {
        &self.table
    }

    /// Physical key of a modifier.
    pub fn modifier_code(&self, modifier: Modifier) -> PhysicalKeyCode {
        match modifier {
            Modifier::Shift => self.shift_code,
            Modifier::Option => self.option_code,
        }
    }

    /// Resolves a single character.  Never fails.
    pub fn resolve(&self, c: char) -> ResolvedKey {
        let mut needs_shift = false;
        let mut needs_option = false;
        let mut c = c;

        if c.is_uppercase() {
            needs_shift = true;
            let mut lower = c.to_lowercase();
            if let (Some(l), None) = (lower.next(), lower.next()) {
                c = l;
            }
        }

        if let Some(base) = self.table.shifted_base(c) {
            needs_shift = true;
            c = base;
        } else if let Some(base) = self.table.option_base(c) {
            needs_option = true;
            c = base;
        }

        let (code, source) = match self.table.char_code(c) {
            Some(code) => (code, KeySource::Table),
            None => {
                trace!(character = ?c, "no key for character, using code point");
                (PhysicalKeyCode(u32::from(c)), KeySource::RawCodePoint)
            }
        };

        ResolvedKey {
            code,
            needs_shift,
            needs_option,
            source,
        }
    }

    /// Resolves a key given by name (`"enter"`, `"page up"`) or by a single
    /// character (`"t"`, `"&"`).
    ///
    /// Single characters go through [`Self::resolve`] and may need
    /// modifiers.  Longer names are matched case-insensitively and never do.
    /// Returns `None` for unknown multi-character names.
    pub fn resolve_key(&self, name: &str) -> Option<ResolvedKey> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(self.resolve(c)),
            _ => self
                .table
                .base_code(name)
                .or_else(|| self.table.base_code(&name.to_lowercase()))
                .map(ResolvedKey::plain),
        }
    }
}

impl Default for LayoutResolver {
    fn default() -> Self {
        Self::new(None)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
