//! Input codes shared with the managed client.
//!
//! The numbering is GLFW's, which is what the client's input handling was
//! written against.

pub const MOUSE_BUTTON_LEFT: i32 = 0;
pub const MOUSE_BUTTON_RIGHT: i32 = 1;
pub const MOUSE_BUTTON_MIDDLE: i32 = 2;
pub const MOUSE_BUTTON_4: i32 = 3;
pub const MOUSE_BUTTON_5: i32 = 4;

pub const ACTION_RELEASE: i32 = 0;
pub const ACTION_PRESS: i32 = 1;
pub const ACTION_REPEAT: i32 = 2;

pub const MOD_SHIFT: i32 = 0x0001;
pub const MOD_CONTROL: i32 = 0x0002;
pub const MOD_ALT: i32 = 0x0004;
pub const MOD_SUPER: i32 = 0x0008;

pub const KEY_UNKNOWN: i32 = -1;

pub const KEY_SPACE: i32 = 32;
pub const KEY_APOSTROPHE: i32 = 39;
pub const KEY_COMMA: i32 = 44;
pub const KEY_MINUS: i32 = 45;
pub const KEY_PERIOD: i32 = 46;
pub const KEY_SLASH: i32 = 47;
/// `KEY_0` .. `KEY_9` are contiguous.
pub const KEY_0: i32 = 48;
pub const KEY_SEMICOLON: i32 = 59;
pub const KEY_EQUAL: i32 = 61;
/// `KEY_A` .. `KEY_Z` are contiguous.
pub const KEY_A: i32 = 65;
pub const KEY_LEFT_BRACKET: i32 = 91;
pub const KEY_BACKSLASH: i32 = 92;
pub const KEY_RIGHT_BRACKET: i32 = 93;
pub const KEY_GRAVE_ACCENT: i32 = 96;

pub const KEY_ESCAPE: i32 = 256;
pub const KEY_ENTER: i32 = 257;
pub const KEY_TAB: i32 = 258;
pub const KEY_BACKSPACE: i32 = 259;
pub const KEY_INSERT: i32 = 260;
pub const KEY_DELETE: i32 = 261;
pub const KEY_RIGHT: i32 = 262;
pub const KEY_LEFT: i32 = 263;
pub const KEY_DOWN: i32 = 264;
pub const KEY_UP: i32 = 265;
pub const KEY_PAGE_UP: i32 = 266;
pub const KEY_PAGE_DOWN: i32 = 267;
pub const KEY_HOME: i32 = 268;
pub const KEY_END: i32 = 269;
pub const KEY_CAPS_LOCK: i32 = 280;
/// `KEY_F1` .. `KEY_F12` are contiguous.
pub const KEY_F1: i32 = 290;

pub const KEY_LEFT_SHIFT: i32 = 340;
pub const KEY_LEFT_CONTROL: i32 = 341;
pub const KEY_LEFT_ALT: i32 = 342;
pub const KEY_LEFT_SUPER: i32 = 343;
pub const KEY_RIGHT_SHIFT: i32 = 344;
pub const KEY_RIGHT_CONTROL: i32 = 345;
pub const KEY_RIGHT_ALT: i32 = 346;
pub const KEY_RIGHT_SUPER: i32 = 347;
