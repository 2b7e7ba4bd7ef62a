//! Engine-owned geometry: chunk meshes keyed by filter and id, and the
//! per-frame GUI draw list.

mod gui;
mod mesh_store;

pub use gui::{normalize_gui_texture_name, GuiBuffers, GuiDraw, GuiUpload};
pub use mesh_store::{ChunkMesh, ChunkOp, ChunkUpload, MeshStore};

use crate::error::ContractViolation;

/// Checks that every index addresses one of `vertex_count` vertices.
pub(crate) fn check_indices(what: impl FnOnce() -> String, indices: &[i32], vertex_count: usize) -> Result<(), ContractViolation> {
    match indices
        .iter()
        .find(|&&i| usize::try_from(i).map_or(true, |i| i >= vertex_count))
    {
        Some(&bad) => Err(ContractViolation::IndexOutOfRange {
            what: what(),
            index: i64::from(bad),
            vertex_count,
        }),
        None => Ok(()),
    }
}
