use std::collections::{BTreeMap, HashMap};

use nova_wire::VertexFormat;

use crate::error::ContractViolation;
use super::check_indices;

/// Chunk geometry copied out of a caller buffer, still in wire layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkUpload {
    pub format_tag: i32,
    pub position: [f32; 3],
    pub id: i32,
    pub vertices: Vec<i32>,
    pub indices: Vec<i32>,
}

/// Validated chunk geometry in stored layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    pub format: VertexFormat,
    pub position: [f32; 3],
    pub vertices: Vec<i32>,
    pub indices: Vec<i32>,
    /// Changes every time the mesh is replaced.
    pub revision: u64,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.format.stored_stride()
    }
}

/// A staged change, applied at the next frame boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOp {
    Upsert { filter: String, id: i32, mesh: ChunkMesh },
    Remove { filter: String, id: i32 },
}

/// Chunk table keyed by (filter, id).
///
/// Adds and removes are validated immediately but only staged; `apply_staged`
/// replays them in call order so a frame never sees half of a batch.
#[derive(Debug, Default)]
pub struct MeshStore {
    filters: BTreeMap<String, HashMap<i32, ChunkMesh>>,
    staged: Vec<ChunkOp>,
    next_revision: u64,
}

impl MeshStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stages an upsert of `(filter, upload.id)`.
    pub fn stage_add(&mut self, filter: String, upload: ChunkUpload) -> Result<(), ContractViolation> {
        let ChunkUpload { format_tag, position, id, vertices, indices } = upload;

        let Some(format) = VertexFormat::from_tag(format_tag) else {
            return Err(ContractViolation::UnknownVertexFormat { filter, id, tag: format_tag });
        };

        let stride = format.wire_stride();
        if vertices.len() % stride != 0 {
            return Err(ContractViolation::VertexStride {
                what: format!("chunk {id} in `{filter}` ({})", format.name()),
                len: vertices.len(),
                stride,
            });
        }
        let vertex_count = vertices.len() / stride;
        check_indices(|| format!("chunk {id} in `{filter}`"), &indices, vertex_count)?;

        log::trace!(
            "staging chunk {id} in `{filter}`: {vertex_count} vertices, {} indices",
            indices.len()
        );

        self.next_revision += 1;
        let mesh = ChunkMesh {
            format,
            position,
            vertices: pad_to_stored(format, vertices),
            indices,
            revision: self.next_revision,
        };
        self.staged.push(ChunkOp::Upsert { filter, id, mesh });
        Ok(())
    }

    /// Stages removal of `(filter, id)`. Unknown ids are a no-op when applied.
    pub fn stage_remove(&mut self, filter: String, id: i32) {
        log::trace!("staging removal of chunk {id} in `{filter}`");
        self.staged.push(ChunkOp::Remove { filter, id });
    }

    /// Replays every staged op in order. Returns how many ops were applied.
    pub fn apply_staged(&mut self) -> usize {
        let ops = std::mem::take(&mut self.staged);
        let n = ops.len();

        for op in ops {
            match op {
                ChunkOp::Upsert { filter, id, mesh } => {
                    self.filters.entry(filter).or_default().insert(id, mesh);
                }
                ChunkOp::Remove { filter, id } => {
                    let removed = self.filters.get_mut(&filter).and_then(|m| m.remove(&id));
                    if removed.is_none() {
                        log::debug!("remove of unknown chunk {id} in `{filter}` ignored");
                    }
                    if self.filters.get(&filter).is_some_and(HashMap::is_empty) {
                        self.filters.remove(&filter);
                    }
                }
            }
        }

        n
    }

    pub fn get(&self, filter: &str, id: i32) -> Option<&ChunkMesh> {
        self.filters.get(filter)?.get(&id)
    }

    /// Number of chunks stored under `filter`.
    pub fn chunk_count(&self, filter: &str) -> usize {
        self.filters.get(filter).map_or(0, HashMap::len)
    }

    /// Filters that currently hold at least one chunk, sorted.
    pub fn filters(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32, &ChunkMesh)> {
        self.filters
            .iter()
            .flat_map(|(f, m)| m.iter().map(move |(id, mesh)| (f.as_str(), *id, mesh)))
    }
}

/// Expands wire vertices to the stored stride by appending zero words.
fn pad_to_stored(format: VertexFormat, vertices: Vec<i32>) -> Vec<i32> {
    let wire = format.wire_stride();
    let stored = format.stored_stride();
    if wire == stored {
        return vertices;
    }

    let mut out = Vec::with_capacity(vertices.len() / wire * stored);
    for v in vertices.chunks_exact(wire) {
        out.extend_from_slice(v);
        out.resize(out.len() + (stored - wire), 0);
    }
    out
}
