//! Atlas and lightmap storage.
//!
//! The texture manager owns copies of every uploaded page. GPU residency is
//! derived from it each frame (see `device::residency`), keyed by name and
//! page revision.

mod manager;

pub use manager::{AtlasPage, TextureManager, TextureUpload, UvRect, LIGHTMAP_NAME};
