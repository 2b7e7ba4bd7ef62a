use nova_wire::codes;
use nova_wire::{KeyCharEvent, KeyPressEvent, MouseButtonEvent, MousePositionEvent, MouseScrollEvent};

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// GLFW button number.
    pub fn code(self) -> i32 {
        match self {
            MouseButton::Left => codes::MOUSE_BUTTON_LEFT,
            MouseButton::Right => codes::MOUSE_BUTTON_RIGHT,
            MouseButton::Middle => codes::MOUSE_BUTTON_MIDDLE,
            MouseButton::Back => codes::MOUSE_BUTTON_4,
            MouseButton::Forward => codes::MOUSE_BUTTON_5,
            MouseButton::Other(n) => i32::from(n),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Release,
    Press,
    Repeat,
}

impl KeyAction {
    pub fn code(self) -> i32 {
        match self {
            KeyAction::Release => codes::ACTION_RELEASE,
            KeyAction::Press => codes::ACTION_PRESS,
            KeyAction::Repeat => codes::ACTION_REPEAT,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// GLFW modifier bitmask.
    pub fn bits(&self) -> i32 {
        let mut bits = 0;
        if self.shift {
            bits |= codes::MOD_SHIFT;
        }
        if self.ctrl {
            bits |= codes::MOD_CONTROL;
        }
        if self.alt {
            bits |= codes::MOD_ALT;
        }
        if self.meta {
            bits |= codes::MOD_SUPER;
        }
        bits
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MouseButtonInput {
    pub button: MouseButton,
    /// Mouse buttons never repeat.
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

/// Cursor position in physical window pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MousePosition {
    pub x: i32,
    pub y: i32,
}

/// Scroll offset in lines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollInput {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyInput {
    /// GLFW key code, `-1` when the key has no GLFW equivalent.
    pub key: i32,
    /// Platform scancode.
    pub scancode: i32,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

/// One character of committed text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CharInput(pub char);

/// Platform-agnostic input events, one variant per bridge queue.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    MouseButton(MouseButtonInput),
    MousePosition(MousePosition),
    Scroll(ScrollInput),
    Key(KeyInput),
    Char(CharInput),
}

// Wire conversions. `filled` is set by `Sentinel::from_option`.

impl From<MouseButtonInput> for MouseButtonEvent {
    fn from(ev: MouseButtonInput) -> Self {
        Self {
            button: ev.button.code(),
            action: ev.action.code(),
            mods: ev.modifiers.bits(),
            filled: 1,
        }
    }
}

impl From<MousePosition> for MousePositionEvent {
    fn from(ev: MousePosition) -> Self {
        Self { xpos: ev.x, ypos: ev.y, filled: 1 }
    }
}

impl From<ScrollInput> for MouseScrollEvent {
    fn from(ev: ScrollInput) -> Self {
        Self { xoffset: ev.x, yoffset: ev.y, filled: 1 }
    }
}

impl From<KeyInput> for KeyPressEvent {
    fn from(ev: KeyInput) -> Self {
        Self {
            key: ev.key,
            scancode: ev.scancode,
            action: ev.action.code(),
            mods: ev.modifiers.bits(),
            filled: 1,
        }
    }
}

impl From<CharInput> for KeyCharEvent {
    fn from(ev: CharInput) -> Self {
        Self { unicode_char: i64::from(u32::from(ev.0)), filled: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_wire::Sentinel;

    #[test]
    fn modifier_bits_match_glfw() {
        let m = Modifiers { shift: true, ctrl: false, alt: true, meta: false };
        assert_eq!(m.bits(), 0x1 | 0x4);
        assert_eq!(Modifiers::default().bits(), 0);
    }

    #[test]
    fn button_event_converts_to_wire() {
        let ev = MouseButtonInput {
            button: MouseButton::Right,
            action: KeyAction::Press,
            modifiers: Modifiers { ctrl: true, ..Modifiers::default() },
        };
        let wire = MouseButtonEvent::from(ev);
        assert_eq!((wire.button, wire.action, wire.mods), (1, 1, 2));
        assert!(wire.is_filled());
    }

    #[test]
    fn char_event_carries_scalar_value() {
        let wire = KeyCharEvent::from(CharInput('ß'));
        assert_eq!(wire.unicode_char, 'ß' as i64);
        assert_eq!(wire.filled, 1);
    }
}
