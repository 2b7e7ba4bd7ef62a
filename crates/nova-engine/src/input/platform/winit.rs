use nova_wire::codes;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::platform::scancode::PhysicalKeyExtScancode;

use crate::input::{
    CharInput, InputEvent, InputQueues, KeyAction, KeyInput, Modifiers, MouseButton,
    MouseButtonInput, MousePosition, ScrollInput,
};

/// Pixel deltas (touchpads) are reported to the caller in lines.
const PIXELS_PER_LINE: f64 = 20.0;

/// Translates a winit `WindowEvent` into zero or more queued input events.
///
/// Events not represented by the bridge queues are ignored.
pub(crate) fn translate_window_event(event: &WindowEvent, queues: &mut InputQueues) {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            // winit 0.30: ModifiersChanged carries a wrapper with `.state()`.
            let ms: ModifiersState = m.state();
            queues.modifiers = map_modifiers(ms);
        }

        WindowEvent::CursorMoved { position, .. } => {
            queues.push(InputEvent::MousePosition(MousePosition {
                x: position.x.round() as i32,
                y: position.y.round() as i32,
            }));
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let action = match st {
                ElementState::Pressed => KeyAction::Press,
                ElementState::Released => KeyAction::Release,
            };

            queues.push(InputEvent::MouseButton(MouseButtonInput {
                button: map_mouse_button(*button),
                action,
                modifiers: queues.modifiers,
            }));
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (f64::from(*x), f64::from(*y)),
                MouseScrollDelta::PixelDelta(p) => (p.x / PIXELS_PER_LINE, p.y / PIXELS_PER_LINE),
            };
            queues.push(InputEvent::Scroll(ScrollInput { x, y }));
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let action = match (event.state, event.repeat) {
                (ElementState::Released, _) => KeyAction::Release,
                (ElementState::Pressed, false) => KeyAction::Press,
                (ElementState::Pressed, true) => KeyAction::Repeat,
            };

            let scancode = event
                .physical_key
                .to_scancode()
                .and_then(|s| i32::try_from(s).ok())
                .unwrap_or(0);

            queues.push(InputEvent::Key(KeyInput {
                key: map_key(event.physical_key),
                scancode,
                action,
                modifiers: queues.modifiers,
            }));

            if event.state == ElementState::Pressed {
                if let Some(text) = &event.text {
                    push_text(text, queues);
                }
            }
        }

        WindowEvent::Ime(winit::event::Ime::Commit(text)) => push_text(text, queues),

        _ => {}
    }
}

/// Raw motion while the cursor is grabbed: advance a virtual cursor so the
/// caller keeps receiving position events.
pub(crate) fn translate_mouse_motion(delta: (f64, f64), queues: &mut InputQueues) {
    let (x, y) = queues.cursor.unwrap_or((0.0, 0.0));
    let (nx, ny) = (x + delta.0, y + delta.1);
    queues.push(InputEvent::MousePosition(MousePosition {
        x: nx.round() as i32,
        y: ny.round() as i32,
    }));
    queues.cursor = Some((nx, ny));
}

// Control characters have their own key events.
fn push_text(text: &str, queues: &mut InputQueues) {
    for c in text.chars().filter(|c| !c.is_control()) {
        queues.push(InputEvent::Char(CharInput(c)));
    }
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> i32 {
    let PhysicalKey::Code(code) = pk else {
        return codes::KEY_UNKNOWN;
    };

    match code {
        KeyCode::Space => codes::KEY_SPACE,
        KeyCode::Quote => codes::KEY_APOSTROPHE,
        KeyCode::Comma => codes::KEY_COMMA,
        KeyCode::Minus => codes::KEY_MINUS,
        KeyCode::Period => codes::KEY_PERIOD,
        KeyCode::Slash => codes::KEY_SLASH,
        KeyCode::Semicolon => codes::KEY_SEMICOLON,
        KeyCode::Equal => codes::KEY_EQUAL,
        KeyCode::BracketLeft => codes::KEY_LEFT_BRACKET,
        KeyCode::Backslash => codes::KEY_BACKSLASH,
        KeyCode::BracketRight => codes::KEY_RIGHT_BRACKET,
        KeyCode::Backquote => codes::KEY_GRAVE_ACCENT,

        KeyCode::Digit0 => codes::KEY_0,
        KeyCode::Digit1 => codes::KEY_0 + 1,
        KeyCode::Digit2 => codes::KEY_0 + 2,
        KeyCode::Digit3 => codes::KEY_0 + 3,
        KeyCode::Digit4 => codes::KEY_0 + 4,
        KeyCode::Digit5 => codes::KEY_0 + 5,
        KeyCode::Digit6 => codes::KEY_0 + 6,
        KeyCode::Digit7 => codes::KEY_0 + 7,
        KeyCode::Digit8 => codes::KEY_0 + 8,
        KeyCode::Digit9 => codes::KEY_0 + 9,

        KeyCode::KeyA => codes::KEY_A,
        KeyCode::KeyB => codes::KEY_A + 1,
        KeyCode::KeyC => codes::KEY_A + 2,
        KeyCode::KeyD => codes::KEY_A + 3,
        KeyCode::KeyE => codes::KEY_A + 4,
        KeyCode::KeyF => codes::KEY_A + 5,
        KeyCode::KeyG => codes::KEY_A + 6,
        KeyCode::KeyH => codes::KEY_A + 7,
        KeyCode::KeyI => codes::KEY_A + 8,
        KeyCode::KeyJ => codes::KEY_A + 9,
        KeyCode::KeyK => codes::KEY_A + 10,
        KeyCode::KeyL => codes::KEY_A + 11,
        KeyCode::KeyM => codes::KEY_A + 12,
        KeyCode::KeyN => codes::KEY_A + 13,
        KeyCode::KeyO => codes::KEY_A + 14,
        KeyCode::KeyP => codes::KEY_A + 15,
        KeyCode::KeyQ => codes::KEY_A + 16,
        KeyCode::KeyR => codes::KEY_A + 17,
        KeyCode::KeyS => codes::KEY_A + 18,
        KeyCode::KeyT => codes::KEY_A + 19,
        KeyCode::KeyU => codes::KEY_A + 20,
        KeyCode::KeyV => codes::KEY_A + 21,
        KeyCode::KeyW => codes::KEY_A + 22,
        KeyCode::KeyX => codes::KEY_A + 23,
        KeyCode::KeyY => codes::KEY_A + 24,
        KeyCode::KeyZ => codes::KEY_A + 25,

        KeyCode::Escape => codes::KEY_ESCAPE,
        KeyCode::Enter => codes::KEY_ENTER,
        KeyCode::Tab => codes::KEY_TAB,
        KeyCode::Backspace => codes::KEY_BACKSPACE,
        KeyCode::Insert => codes::KEY_INSERT,
        KeyCode::Delete => codes::KEY_DELETE,
        KeyCode::ArrowRight => codes::KEY_RIGHT,
        KeyCode::ArrowLeft => codes::KEY_LEFT,
        KeyCode::ArrowDown => codes::KEY_DOWN,
        KeyCode::ArrowUp => codes::KEY_UP,
        KeyCode::PageUp => codes::KEY_PAGE_UP,
        KeyCode::PageDown => codes::KEY_PAGE_DOWN,
        KeyCode::Home => codes::KEY_HOME,
        KeyCode::End => codes::KEY_END,
        KeyCode::CapsLock => codes::KEY_CAPS_LOCK,

        KeyCode::F1 => codes::KEY_F1,
        KeyCode::F2 => codes::KEY_F1 + 1,
        KeyCode::F3 => codes::KEY_F1 + 2,
        KeyCode::F4 => codes::KEY_F1 + 3,
        KeyCode::F5 => codes::KEY_F1 + 4,
        KeyCode::F6 => codes::KEY_F1 + 5,
        KeyCode::F7 => codes::KEY_F1 + 6,
        KeyCode::F8 => codes::KEY_F1 + 7,
        KeyCode::F9 => codes::KEY_F1 + 8,
        KeyCode::F10 => codes::KEY_F1 + 9,
        KeyCode::F11 => codes::KEY_F1 + 10,
        KeyCode::F12 => codes::KEY_F1 + 11,

        KeyCode::ShiftLeft => codes::KEY_LEFT_SHIFT,
        KeyCode::ControlLeft => codes::KEY_LEFT_CONTROL,
        KeyCode::AltLeft => codes::KEY_LEFT_ALT,
        KeyCode::SuperLeft => codes::KEY_LEFT_SUPER,
        KeyCode::ShiftRight => codes::KEY_RIGHT_SHIFT,
        KeyCode::ControlRight => codes::KEY_RIGHT_CONTROL,
        KeyCode::AltRight => codes::KEY_RIGHT_ALT,
        KeyCode::SuperRight => codes::KEY_RIGHT_SUPER,

        _ => codes::KEY_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_are_ascii() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), 'W' as i32);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit7)), '7' as i32);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F12)), 301);
    }

    #[test]
    fn unmapped_key_is_unknown() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::MediaPlayPause)), codes::KEY_UNKNOWN);
    }

    #[test]
    fn grabbed_motion_accumulates() {
        let mut q = InputQueues::new(8);
        translate_mouse_motion((3.0, -2.0), &mut q);
        translate_mouse_motion((1.0, 1.0), &mut q);
        assert_eq!(q.next_mouse_position(), Some(MousePosition { x: 3, y: -2 }));
        assert_eq!(q.next_mouse_position(), Some(MousePosition { x: 4, y: -1 }));
    }

    #[test]
    fn control_characters_are_not_chars() {
        let mut q = InputQueues::new(8);
        push_text("a\r\u{8}b", &mut q);
        assert_eq!(q.next_key_char(), Some(CharInput('a')));
        assert_eq!(q.next_key_char(), Some(CharInput('b')));
        assert_eq!(q.next_key_char(), None);
    }
}
