use std::os::raw::c_char;

use bytemuck::Zeroable;

/// `mc_atlas_texture`: one texture page.
///
/// `texture_data` points at `width * height * num_components` bytes owned by
/// the caller. `name` is set separately by the caller and sits after the
/// ordered fields.
#[repr(C)]
#[derive(Debug, Copy, Clone, Zeroable)]
pub struct AtlasTexture {
    pub width: i32,
    pub height: i32,
    pub num_components: i32,
    pub texture_data: *const u8,
    pub name: *const c_char,
}

/// `mc_texture_atlas_location`: UV rectangle of a named sprite.
///
/// Note the field order (`min_u, max_u, min_v, max_v`) differs from the
/// argument order of the managed constructor.
#[repr(C)]
#[derive(Debug, Copy, Clone, Zeroable)]
pub struct AtlasLocation {
    pub name: *const c_char,
    pub min_u: f32,
    pub max_u: f32,
    pub min_v: f32,
    pub max_v: f32,
}
