//! Wire structs for the Nova native bridge.
//!
//! Every type here is `#[repr(C)]` and its field order is part of the contract
//! with the managed caller. Offsets are checked at compile time in `layout`;
//! any change to a layout must bump [`LAYOUT_VERSION`].
//!
//! Structs that carry pointers (`AtlasTexture`, `ChunkRenderObject`,
//! `GuiBuffer`, `AtlasLocation`) only borrow caller memory for the duration of
//! a call. [`borrow_slice`] and [`borrow_c_str`] read through those pointers;
//! callers copy what they keep.

pub mod codes;
mod events;
mod geometry;
mod layout;
mod settings;
mod texture;

pub use events::{
    KeyCharEvent,
    KeyPressEvent,
    MouseButtonEvent,
    MousePositionEvent,
    MouseScrollEvent,
    Sentinel,
    WindowSize,
};
pub use geometry::{ChunkRenderObject, GeometryType, GuiBuffer, VertexFormat, GUI_VERTEX_STRIDE};
pub use layout::{layout_version, NativeBool, LAYOUT_VERSION, NATIVE_FALSE, NATIVE_TRUE};
pub use settings::Settings;
pub use texture::{AtlasLocation, AtlasTexture};

/// Reads a NUL-terminated string borrowed from the caller.
///
/// Returns `None` for a null pointer, `Some(Err(..))` when the bytes are not UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated buffer valid for the
/// duration of the borrow.
pub unsafe fn borrow_c_str<'a>(
    ptr: *const std::os::raw::c_char,
) -> Option<Result<&'a str, std::str::Utf8Error>> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let cstr = unsafe { std::ffi::CStr::from_ptr(ptr) };
    Some(cstr.to_str())
}

/// Borrows `len` elements starting at `ptr`.
///
/// A zero length yields an empty slice regardless of `ptr`. A null pointer with
/// a non-zero length yields `None`.
///
/// # Safety
/// When `len > 0` and `ptr` is non-null, `ptr` must be valid for reads of
/// `len` elements of `T` for the duration of the borrow.
pub unsafe fn borrow_slice<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    if len == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null, `len` elements readable per the caller contract.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn borrow_c_str_handles_null_and_text() {
        assert!(unsafe { borrow_c_str(std::ptr::null()) }.is_none());

        let s = CString::new("minecraft:blocks").unwrap();
        let got = unsafe { borrow_c_str(s.as_ptr()) }.unwrap().unwrap();
        assert_eq!(got, "minecraft:blocks");
    }

    #[test]
    fn borrow_c_str_reports_invalid_utf8() {
        let bytes = [0xffu8, 0xfe, 0x00];
        let got = unsafe { borrow_c_str(bytes.as_ptr().cast()) }.unwrap();
        assert!(got.is_err());
    }

    #[test]
    fn borrow_slice_zero_len_ignores_pointer() {
        let got: &[i32] = unsafe { borrow_slice(std::ptr::null(), 0) }.unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn borrow_slice_null_with_len_is_none() {
        assert!(unsafe { borrow_slice::<f32>(std::ptr::null(), 3) }.is_none());
    }
}
