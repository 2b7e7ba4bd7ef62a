//! GPU device, surface and resident resources.
//!
//! This module is responsible for:
//! - creating the wgpu device and surface for the game window
//! - turning each frame's surface result into engine state
//! - keeping uploaded textures and chunk meshes resident on the device

mod gpu;
mod residency;
mod surface;

pub use gpu::Gpu;
pub use residency::{diff_revisions, GpuResidency};
pub use surface::FrameOutcome;
