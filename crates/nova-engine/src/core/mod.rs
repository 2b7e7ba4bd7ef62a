//! The running engine.
//!
//! [`Engine`] is the Running state of the bridge: it exists only between
//! `initialize()` and `shutdown()`. Everything the caller uploads is owned
//! here, and `execute_frame` is the single point where staged work becomes
//! visible to the renderer.

mod diagnostics;
mod engine;

pub use diagnostics::{FilterReport, MaterialReport, ShadersAndFilters};
pub use engine::Engine;
