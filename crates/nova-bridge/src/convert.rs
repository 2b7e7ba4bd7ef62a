//! Copies caller-owned wire structs into engine-owned values.
//!
//! Nothing returned from here borrows caller memory.

use std::os::raw::c_char;

use nova_engine::geometry::{ChunkUpload, GuiUpload};
use nova_engine::textures::{TextureUpload, UvRect};
use nova_engine::ContractViolation;
use nova_wire::{AtlasLocation, AtlasTexture, ChunkRenderObject, GuiBuffer};

/// Borrows a struct argument. A null struct pointer is always a violation.
///
/// # Safety
/// `ptr` must be null or point to a valid `T` for the duration of the call.
pub(crate) unsafe fn arg<'a, T>(ptr: *const T, what: &'static str) -> Result<&'a T, ContractViolation> {
    // SAFETY: caller contract.
    unsafe { ptr.as_ref() }.ok_or(ContractViolation::NullPointer { what })
}

/// Copies a NUL-terminated UTF-8 string.
///
/// # Safety
/// `ptr` must be null or a valid NUL-terminated string.
pub(crate) unsafe fn string(ptr: *const c_char, what: &'static str) -> Result<String, ContractViolation> {
    match unsafe { nova_wire::borrow_c_str(ptr) } {
        None => Err(ContractViolation::NullPointer { what }),
        Some(Err(_)) => Err(ContractViolation::InvalidUtf8 { what }),
        Some(Ok(s)) => Ok(s.to_owned()),
    }
}

fn non_negative(value: i32, what: &'static str) -> Result<usize, ContractViolation> {
    usize::try_from(value).map_err(|_| ContractViolation::NegativeSize { what, size: i64::from(value) })
}

/// # Safety
/// `ptr` must be valid for `len` reads when `len > 0`.
unsafe fn copy_slice<T: Copy>(ptr: *const T, len: i32, what: &'static str) -> Result<Vec<T>, ContractViolation> {
    let len = non_negative(len, what)?;
    unsafe { nova_wire::borrow_slice(ptr, len) }
        .map(<[T]>::to_vec)
        .ok_or(ContractViolation::NullPointer { what })
}

/// # Safety
/// Pointers in `tex` must satisfy the `mc_atlas_texture` contract.
pub(crate) unsafe fn texture_upload(tex: &AtlasTexture) -> Result<TextureUpload, ContractViolation> {
    let name = unsafe { string(tex.name, "add_texture: name") }?;

    let width = non_negative(tex.width, "add_texture: width")?;
    let height = non_negative(tex.height, "add_texture: height")?;
    let components = u8::try_from(tex.num_components)
        .ok()
        .filter(|c| (1..=4).contains(c))
        .ok_or_else(|| ContractViolation::ComponentCount { name: name.clone(), components: tex.num_components })?;

    let len = pixel_len(&name, width, height, components)?;
    let pixels = unsafe { nova_wire::borrow_slice(tex.texture_data, len) }
        .ok_or(ContractViolation::NullPointer { what: "add_texture: texture_data" })?
        .to_vec();

    Ok(TextureUpload {
        name,
        width: width as u32,
        height: height as u32,
        components,
        pixels,
    })
}

/// Bytes a `width x height` page of `components` channels occupies.
fn pixel_len(name: &str, width: usize, height: usize, components: u8) -> Result<usize, ContractViolation> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(usize::from(components)))
        .ok_or_else(|| ContractViolation::TextureTooLarge {
            name: name.to_owned(),
            width,
            height,
            components,
        })
}

/// # Safety
/// `loc.name` must satisfy the string contract.
pub(crate) unsafe fn location(loc: &AtlasLocation) -> Result<(String, UvRect), ContractViolation> {
    let name = unsafe { string(loc.name, "add_texture_location: name") }?;
    let rect = UvRect {
        min: [loc.min_u, loc.min_v],
        max: [loc.max_u, loc.max_v],
    };
    Ok((name, rect))
}

/// # Safety
/// Buffers in `obj` must satisfy the `mc_chunk_render_object` contract.
pub(crate) unsafe fn chunk_upload(obj: &ChunkRenderObject) -> Result<ChunkUpload, ContractViolation> {
    let vertices = unsafe { copy_slice(obj.vertex_data, obj.vertex_buffer_size, "chunk: vertex_data") }?;
    let indices = unsafe { copy_slice(obj.indices, obj.index_buffer_size, "chunk: indices") }?;
    Ok(ChunkUpload {
        format_tag: obj.format,
        position: [obj.x, obj.y, obj.z],
        id: obj.id,
        vertices,
        indices,
    })
}

/// # Safety
/// Buffers and strings in `buf` must satisfy the `mc_gui_buffer` contract.
pub(crate) unsafe fn gui_upload(buf: &GuiBuffer) -> Result<GuiUpload, ContractViolation> {
    let texture_name = unsafe { string(buf.texture_name, "add_gui_geometry: texture_name") }?;
    // Older clients leave the atlas unset.
    let atlas_name = match unsafe { nova_wire::borrow_c_str(buf.atlas_name) } {
        None => String::new(),
        Some(Ok(s)) => s.to_owned(),
        Some(Err(_)) => return Err(ContractViolation::InvalidUtf8 { what: "add_gui_geometry: atlas_name" }),
    };
    let vertices = unsafe { copy_slice(buf.vertex_buffer, buf.vertex_buffer_size, "gui: vertex_buffer") }?;
    let indices = unsafe { copy_slice(buf.index_buffer, buf.index_buffer_size, "gui: index_buffer") }?;
    Ok(GuiUpload { texture_name, atlas_name, vertices, indices })
}

/// Copies the lightmap words. Pixels are packed 32-bit values; the sign is irrelevant.
///
/// # Safety
/// `data` must be valid for `length` reads when `length > 0`.
pub(crate) unsafe fn lightmap(data: *const i32, length: i32) -> Result<Vec<u32>, ContractViolation> {
    let words = unsafe { copy_slice(data, length, "send_lightmap_texture: data") }?;
    Ok(words.into_iter().map(|w| w as u32).collect())
}

pub(crate) fn dimension(value: i32, what: &'static str) -> Result<u32, ContractViolation> {
    u32::try_from(value).map_err(|_| ContractViolation::NegativeSize { what, size: i64::from(value) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    // ── textures ──────────────────────────────────────────────────────────

    #[test]
    fn texture_bytes_are_copied() {
        let name = CString::new("blocks").unwrap();
        let mut bytes = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let tex = AtlasTexture {
            width: 2,
            height: 1,
            num_components: 4,
            texture_data: bytes.as_ptr(),
            name: name.as_ptr(),
        };

        let up = unsafe { texture_upload(&tex) }.unwrap();
        bytes.fill(0);

        assert_eq!(up.name, "blocks");
        assert_eq!(up.pixels, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn texture_components_out_of_range() {
        let name = CString::new("x").unwrap();
        let tex = AtlasTexture {
            width: 1,
            height: 1,
            num_components: 0,
            texture_data: std::ptr::null(),
            name: name.as_ptr(),
        };
        let err = unsafe { texture_upload(&tex) }.unwrap_err();
        assert!(matches!(err, ContractViolation::ComponentCount { components: 0, .. }));
    }

    #[test]
    fn texture_null_data_with_size() {
        let name = CString::new("x").unwrap();
        let tex = AtlasTexture {
            width: 1,
            height: 1,
            num_components: 3,
            texture_data: std::ptr::null(),
            name: name.as_ptr(),
        };
        let err = unsafe { texture_upload(&tex) }.unwrap_err();
        assert!(matches!(err, ContractViolation::NullPointer { .. }));
    }

    #[test]
    fn texture_size_overflow_is_not_reported_as_negative() {
        let err = pixel_len("huge", usize::MAX, 2, 4).unwrap_err();
        assert!(matches!(err, ContractViolation::TextureTooLarge { components: 4, .. }));
        assert!(err.to_string().contains("overflows"));
        assert_eq!(pixel_len("ok", 2, 1, 4), Ok(8));
    }

    // ── strings ───────────────────────────────────────────────────────────

    #[test]
    fn null_and_invalid_strings() {
        assert!(matches!(
            unsafe { string(std::ptr::null(), "s") },
            Err(ContractViolation::NullPointer { what: "s" })
        ));
        let bad = [0xc3u8, 0x28, 0];
        assert!(matches!(
            unsafe { string(bad.as_ptr().cast(), "s") },
            Err(ContractViolation::InvalidUtf8 { what: "s" })
        ));
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn chunk_negative_size() {
        let obj = ChunkRenderObject {
            format: 0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            id: 1,
            vertex_data: std::ptr::null(),
            indices: std::ptr::null(),
            vertex_buffer_size: -1,
            index_buffer_size: 0,
        };
        let err = unsafe { chunk_upload(&obj) }.unwrap_err();
        assert!(matches!(err, ContractViolation::NegativeSize { size: -1, .. }));
    }

    #[test]
    fn gui_without_atlas_name() {
        let name = CString::new("textures/gui/icons.png").unwrap();
        let verts = [0.0f32; 9];
        let idx = [0i32];
        let buf = GuiBuffer {
            texture_name: name.as_ptr(),
            index_buffer_size: 1,
            vertex_buffer_size: 9,
            index_buffer: idx.as_ptr(),
            vertex_buffer: verts.as_ptr(),
            atlas_name: std::ptr::null(),
        };
        let up = unsafe { gui_upload(&buf) }.unwrap();
        assert_eq!(up.atlas_name, "");
        assert_eq!(up.vertices.len(), 9);
    }

    #[test]
    fn lightmap_words_keep_their_bits() {
        let data = [-1i32, 0x00ff_00ff];
        let words = unsafe { lightmap(data.as_ptr(), 2) }.unwrap();
        assert_eq!(words, vec![0xffff_ffff, 0x00ff_00ff]);
    }
}
