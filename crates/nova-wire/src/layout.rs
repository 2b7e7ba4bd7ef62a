use core::mem::{offset_of, size_of};

use crate::events::{
    KeyCharEvent, KeyPressEvent, MouseButtonEvent, MousePositionEvent, MouseScrollEvent, WindowSize,
};
use crate::geometry::{ChunkRenderObject, GuiBuffer};
use crate::settings::Settings;
use crate::texture::{AtlasLocation, AtlasTexture};

/// Version of the byte layout described in this crate.
///
/// Bump whenever a field is added, removed, reordered or retyped.
pub const LAYOUT_VERSION: u32 = 2;

/// Boolean as it crosses the boundary: scalar arguments, return values and
/// struct fields alike.
pub type NativeBool = i32;

pub const NATIVE_FALSE: NativeBool = 0;
pub const NATIVE_TRUE: NativeBool = 1;

/// Returns [`LAYOUT_VERSION`]; exported so the caller can check it at load time.
pub const fn layout_version() -> u32 {
    LAYOUT_VERSION
}

macro_rules! assert_layout {
    ($ty:ty, size = $size:expr, { $($field:ident = $off:expr),* $(,)? }) => {
        const _: () = {
            assert!(size_of::<$ty>() == $size);
            $( assert!(offset_of!($ty, $field) == $off); )*
        };
    };
}

// Offsets below assume a 64-bit target with natural alignment.
#[cfg(target_pointer_width = "64")]
mod offsets {
    use super::*;

    assert_layout!(AtlasTexture, size = 32, {
        width = 0, height = 4, num_components = 8, texture_data = 16, name = 24,
    });

    assert_layout!(AtlasLocation, size = 24, {
        name = 0, min_u = 8, max_u = 12, min_v = 16, max_v = 20,
    });

    assert_layout!(ChunkRenderObject, size = 48, {
        format = 0, x = 4, y = 8, z = 12, id = 16,
        vertex_data = 24, indices = 32, vertex_buffer_size = 40, index_buffer_size = 44,
    });

    assert_layout!(Settings, size = 56, {
        render_menu = 0, anaglyph = 4,
        fog_color_red = 8, fog_color_green = 16, fog_color_blue = 24,
        display_width = 32, display_height = 36,
        view_bobbing = 40, should_render_clouds = 44, render_distance = 48,
        has_blindness = 52,
    });

    assert_layout!(GuiBuffer, size = 40, {
        texture_name = 0, index_buffer_size = 8, vertex_buffer_size = 12,
        index_buffer = 16, vertex_buffer = 24, atlas_name = 32,
    });

    assert_layout!(MouseButtonEvent, size = 16, { button = 0, action = 4, mods = 8, filled = 12 });
    assert_layout!(MousePositionEvent, size = 12, { xpos = 0, ypos = 4, filled = 8 });
    assert_layout!(MouseScrollEvent, size = 24, { xoffset = 0, yoffset = 8, filled = 16 });
    assert_layout!(KeyPressEvent, size = 20, {
        key = 0, scancode = 4, action = 8, mods = 12, filled = 16,
    });
    assert_layout!(KeyCharEvent, size = 16, { unicode_char = 0, filled = 8 });
    assert_layout!(WindowSize, size = 8, { height = 0, width = 4 });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_exported() {
        assert_eq!(layout_version(), LAYOUT_VERSION);
    }

    #[test]
    fn window_size_height_precedes_width() {
        let ws = WindowSize { height: 480, width: 640 };
        let bytes = bytemuck::bytes_of(&ws);
        assert_eq!(&bytes[0..4], &480i32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &640i32.to_ne_bytes());
    }
}
