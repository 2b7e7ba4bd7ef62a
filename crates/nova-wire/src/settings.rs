use bytemuck::Zeroable;

use crate::layout::NativeBool;

/// `mc_settings`: the full render configuration snapshot.
///
/// Pushed wholesale; the engine treats it as authoritative for every field it
/// carries. Flags are 4-byte [`NativeBool`]s, matching how the managed side
/// marshals its booleans; any non-zero value reads as true.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Zeroable)]
pub struct Settings {
    pub render_menu: NativeBool,
    pub anaglyph: NativeBool,

    pub fog_color_red: f64,
    pub fog_color_green: f64,
    pub fog_color_blue: f64,

    pub display_width: i32,
    pub display_height: i32,

    pub view_bobbing: NativeBool,
    /// 0 off, 1 fast, 2 fancy.
    pub should_render_clouds: i32,

    pub render_distance: i32,

    pub has_blindness: NativeBool,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The managed declaration: every flag is a 32-bit int.
    #[repr(C)]
    struct ManagedSettings {
        render_menu: i32,
        anaglyph: i32,
        fog_color_red: f64,
        fog_color_green: f64,
        fog_color_blue: f64,
        display_width: i32,
        display_height: i32,
        view_bobbing: i32,
        should_render_clouds: i32,
        render_distance: i32,
        has_blindness: i32,
    }

    #[test]
    fn managed_flags_land_on_their_fields() {
        let managed = ManagedSettings {
            render_menu: 0,
            anaglyph: 1,
            fog_color_red: 0.25,
            fog_color_green: 0.5,
            fog_color_blue: 0.75,
            display_width: 854,
            display_height: 480,
            view_bobbing: 0x0100,
            should_render_clouds: 2,
            render_distance: 12,
            has_blindness: 1,
        };
        assert_eq!(std::mem::size_of::<ManagedSettings>(), std::mem::size_of::<Settings>());

        // SAFETY: both are repr(C) with the same size and every bit pattern is valid for Settings.
        let s: Settings = unsafe { std::ptr::read((&managed as *const ManagedSettings).cast()) };
        assert_eq!(s.render_menu, 0);
        assert_eq!(s.anaglyph, 1);
        assert_ne!(s.view_bobbing, 0);
        assert_eq!(s.has_blindness, 1);
        assert_eq!(s.fog_color_green, 0.5);
        assert_eq!((s.display_width, s.display_height), (854, 480));
        assert_eq!(s.should_render_clouds, 2);
        assert_eq!(s.render_distance, 12);
    }
}
