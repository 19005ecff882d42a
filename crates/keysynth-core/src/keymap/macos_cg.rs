//! Default key tables for an ANSI (US) Apple keyboard.
//!
//! CGKeyCode values are defined in Carbon Events.h (HIToolbox framework).
//! Reference: /System/Library/Frameworks/Carbon.framework/Versions/A/Frameworks/HIToolbox.framework/Headers/Events.h
//!
//! Names are either the single character a key produces without modifiers
//! (`"a"`, `"1"`, `"["`) or a lower-case key name (`"enter"`, `"page up"`).
//! Keypad keys carry a `k` prefix (`"k5"`, `"k+"`).  Several names may point
//! at the same key (`"esc"` and `"escape"`).

/// `kVK_Shift`, used to bracket shifted characters.
pub const SHIFT: u16 = 0x38;

/// `kVK_Option`, used to bracket option (alt-graph) characters.
pub const OPTION: u16 = 0x3A;

/// Name → CGKeyCode for every key the default layout knows about.
pub const DEFAULT_KEY_CODES: &[(&str, u16)] = &[
    // Letters (macOS uses ANSI key position codes, not ASCII)
    ("a", 0x00), // kVK_ANSI_A
    ("s", 0x01), // kVK_ANSI_S
    ("d", 0x02), // kVK_ANSI_D
    ("f", 0x03), // kVK_ANSI_F
    ("h", 0x04), // kVK_ANSI_H
    ("g", 0x05), // kVK_ANSI_G
    ("z", 0x06), // kVK_ANSI_Z
    ("x", 0x07), // kVK_ANSI_X
    ("c", 0x08), // kVK_ANSI_C
    ("v", 0x09), // kVK_ANSI_V
    ("b", 0x0B), // kVK_ANSI_B
    ("q", 0x0C), // kVK_ANSI_Q
    ("w", 0x0D), // kVK_ANSI_W
    ("e", 0x0E), // kVK_ANSI_E
    ("r", 0x0F), // kVK_ANSI_R
    ("y", 0x10), // kVK_ANSI_Y
    ("t", 0x11), // kVK_ANSI_T
    ("o", 0x1F), // kVK_ANSI_O
    ("u", 0x20), // kVK_ANSI_U
    ("i", 0x22), // kVK_ANSI_I
    ("p", 0x23), // kVK_ANSI_P
    ("l", 0x25), // kVK_ANSI_L
    ("j", 0x26), // kVK_ANSI_J
    ("k", 0x28), // kVK_ANSI_K
    ("n", 0x2D), // kVK_ANSI_N
    ("m", 0x2E), // kVK_ANSI_M
    // Digits
    ("1", 0x12), // kVK_ANSI_1
    ("2", 0x13), // kVK_ANSI_2
    ("3", 0x14), // kVK_ANSI_3
    ("4", 0x15), // kVK_ANSI_4
    ("6", 0x16), // kVK_ANSI_6
    ("5", 0x17), // kVK_ANSI_5
    ("9", 0x19), // kVK_ANSI_9
    ("7", 0x1A), // kVK_ANSI_7
    ("8", 0x1C), // kVK_ANSI_8
    ("0", 0x1D), // kVK_ANSI_0
    // Punctuation / symbols
    ("=", 0x18),  // kVK_ANSI_Equal
    ("-", 0x1B),  // kVK_ANSI_Minus
    ("]", 0x1E),  // kVK_ANSI_RightBracket
    ("[", 0x21),  // kVK_ANSI_LeftBracket
    ("'", 0x27),  // kVK_ANSI_Quote
    (";", 0x29),  // kVK_ANSI_Semicolon
    ("\\", 0x2A), // kVK_ANSI_Backslash
    (",", 0x2B),  // kVK_ANSI_Comma
    ("/", 0x2C),  // kVK_ANSI_Slash
    (".", 0x2F),  // kVK_ANSI_Period
    ("`", 0x32),  // kVK_ANSI_Grave
    // Keypad
    ("k.", 0x41),     // kVK_ANSI_KeypadDecimal
    ("k*", 0x43),     // kVK_ANSI_KeypadMultiply
    ("k+", 0x45),     // kVK_ANSI_KeypadPlus
    ("kclear", 0x47), // kVK_ANSI_KeypadClear
    ("k/", 0x4B),     // kVK_ANSI_KeypadDivide
    ("k\n", 0x4C),    // kVK_ANSI_KeypadEnter
    ("k-", 0x4E),     // kVK_ANSI_KeypadMinus
    ("k=", 0x51),     // kVK_ANSI_KeypadEquals
    ("k0", 0x52),     // kVK_ANSI_Keypad0
    ("k1", 0x53),     // kVK_ANSI_Keypad1
    ("k2", 0x54),     // kVK_ANSI_Keypad2
    ("k3", 0x55),     // kVK_ANSI_Keypad3
    ("k4", 0x56),     // kVK_ANSI_Keypad4
    ("k5", 0x57),     // kVK_ANSI_Keypad5
    ("k6", 0x58),     // kVK_ANSI_Keypad6
    ("k7", 0x59),     // kVK_ANSI_Keypad7
    ("k8", 0x5B),     // kVK_ANSI_Keypad8
    ("k9", 0x5C),     // kVK_ANSI_Keypad9
    // Layout-independent keys
    ("\n", 0x24),            // kVK_Return
    ("enter", 0x24),         // kVK_Return
    ("\t", 0x30),            // kVK_Tab
    ("tab", 0x30),           // kVK_Tab
    (" ", 0x31),             // kVK_Space
    ("space", 0x31),         // kVK_Space
    ("del", 0x33),           // kVK_Delete
    ("delete", 0x33),        // kVK_Delete
    ("esc", 0x35),           // kVK_Escape
    ("escape", 0x35),        // kVK_Escape
    ("cmd", 0x37),           // kVK_Command
    ("command", 0x37),       // kVK_Command
    ("shift", 0x38),         // kVK_Shift
    ("caps lock", 0x39),     // kVK_CapsLock
    ("option", 0x3A),        // kVK_Option
    ("ctrl", 0x3B),          // kVK_Control
    ("control", 0x3B),       // kVK_Control
    ("right shift", 0x3C),   // kVK_RightShift
    ("rshift", 0x3C),        // kVK_RightShift
    ("right option", 0x3D),  // kVK_RightOption
    ("roption", 0x3D),       // kVK_RightOption
    ("right control", 0x3E), // kVK_RightControl
    ("rcontrol", 0x3E),      // kVK_RightControl
    ("fun", 0x3F),           // kVK_Function
    ("function", 0x3F),      // kVK_Function
    ("volume up", 0x48),     // kVK_VolumeUp
    ("volume down", 0x49),   // kVK_VolumeDown
    ("mute", 0x4A),          // kVK_Mute
    ("help", 0x72),          // kVK_Help
    ("home", 0x73),          // kVK_Home
    ("pgup", 0x74),          // kVK_PageUp
    ("page up", 0x74),       // kVK_PageUp
    ("forward delete", 0x75), // kVK_ForwardDelete
    ("end", 0x77),           // kVK_End
    ("page down", 0x79),     // kVK_PageDown
    ("pgdn", 0x79),          // kVK_PageDown
    // Arrow keys
    ("left", 0x7B),  // kVK_LeftArrow
    ("right", 0x7C), // kVK_RightArrow
    ("down", 0x7D),  // kVK_DownArrow
    ("up", 0x7E),    // kVK_UpArrow
    // Function keys
    ("f1", 0x7A),  // kVK_F1
    ("f2", 0x78),  // kVK_F2
    ("f3", 0x63),  // kVK_F3
    ("f4", 0x76),  // kVK_F4
    ("f5", 0x60),  // kVK_F5
    ("f6", 0x61),  // kVK_F6
    ("f7", 0x62),  // kVK_F7
    ("f8", 0x64),  // kVK_F8
    ("f9", 0x65),  // kVK_F9
    ("f10", 0x6D), // kVK_F10
    ("f11", 0x67), // kVK_F11
    ("f12", 0x6F), // kVK_F12
    ("f13", 0x69), // kVK_F13
    ("f14", 0x6B), // kVK_F14
    ("f15", 0x71), // kVK_F15
    ("f16", 0x6A), // kVK_F16
    ("f17", 0x40), // kVK_F17
    ("f18", 0x4F), // kVK_F18
    ("f19", 0x50), // kVK_F19
    ("f20", 0x5A), // kVK_F20
];

/// Symbols produced by holding shift, mapped to the unshifted character of
/// the same key.
pub const DEFAULT_SHIFTED_SYMBOLS: &[(char, char)] = &[
    ('~', '`'),
    ('!', '1'),
    ('@', '2'),
    ('#', '3'),
    ('$', '4'),
    ('%', '5'),
    ('^', '6'),
    ('&', '7'),
    ('*', '8'),
    ('(', '9'),
    (')', '0'),
    ('_', '-'),
    ('+', '='),
    ('{', '['),
    ('}', ']'),
    ('|', '\\'),
    (':', ';'),
    ('"', '\''),
    ('<', ','),
    ('>', '.'),
    ('?', '/'),
];

/// Symbols produced by holding option.  The US layout relies on none.
pub const DEFAULT_OPTION_SYMBOLS: &[(char, char)] = &[];
