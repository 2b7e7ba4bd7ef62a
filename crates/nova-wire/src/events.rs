use bytemuck::{Pod, Zeroable};

/// Fixed-size event struct with an in-band `filled` marker.
///
/// `filled == 0` means the queue was empty and every other field must be
/// ignored. Inside Rust code the same information is an `Option`; use
/// [`Sentinel::into_option`] and [`Sentinel::from_option`] at the boundary.
pub trait Sentinel: Zeroable + Copy {
    fn filled_flag(&self) -> i32;
    fn set_filled_flag(&mut self, filled: i32);

    /// The "queue empty" value: all zero.
    fn empty() -> Self {
        Self::zeroed()
    }

    fn is_filled(&self) -> bool {
        self.filled_flag() != 0
    }

    fn into_option(self) -> Option<Self> {
        self.is_filled().then_some(self)
    }

    fn from_option(ev: Option<Self>) -> Self {
        match ev {
            Some(mut ev) => {
                ev.set_filled_flag(1);
                ev
            }
            None => Self::empty(),
        }
    }
}

macro_rules! sentinel {
    ($ty:ty) => {
        impl Sentinel for $ty {
            #[inline]
            fn filled_flag(&self) -> i32 {
                self.filled
            }

            #[inline]
            fn set_filled_flag(&mut self, filled: i32) {
                self.filled = filled;
            }
        }
    };
}

/// `mouse_button_event`: GLFW button, action and modifier bits.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct MouseButtonEvent {
    pub button: i32,
    pub action: i32,
    pub mods: i32,
    pub filled: i32,
}

/// `mouse_position_event`: cursor position in window pixels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct MousePositionEvent {
    pub xpos: i32,
    pub ypos: i32,
    pub filled: i32,
}

/// `mouse_scroll_event`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Zeroable)]
pub struct MouseScrollEvent {
    pub xoffset: f64,
    pub yoffset: f64,
    pub filled: i32,
}

/// `key_press_event`: GLFW key code, platform scancode, action and modifier bits.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct KeyPressEvent {
    pub key: i32,
    pub scancode: i32,
    pub action: i32,
    pub mods: i32,
    pub filled: i32,
}

/// `key_char_event`: one Unicode scalar value of committed text.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Zeroable)]
pub struct KeyCharEvent {
    pub unicode_char: i64,
    pub filled: i32,
}

sentinel!(MouseButtonEvent);
sentinel!(MousePositionEvent);
sentinel!(MouseScrollEvent);
sentinel!(KeyPressEvent);
sentinel!(KeyCharEvent);

/// `window_size`. Height precedes width on the wire.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct WindowSize {
    pub height: i32,
    pub width: i32,
}

impl WindowSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { height, width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_not_filled() {
        assert!(!MouseButtonEvent::empty().is_filled());
        assert!(!KeyCharEvent::empty().is_filled());
        assert_eq!(MouseScrollEvent::empty().into_option(), None);
    }

    #[test]
    fn from_option_marks_filled() {
        let ev = KeyPressEvent { key: 65, scancode: 30, action: 1, mods: 0, filled: 0 };
        let wire = KeyPressEvent::from_option(Some(ev));
        assert_eq!(wire.filled, 1);
        assert_eq!(wire.key, 65);
        assert_eq!(wire.into_option().map(|e| e.scancode), Some(30));
    }

    #[test]
    fn from_none_is_all_zero() {
        let wire = MousePositionEvent::from_option(None);
        assert_eq!(wire, MousePositionEvent::default());
    }
}
