//! Nova engine crate.
//!
//! Owns everything the managed client uploads (atlases, chunk geometry, GUI
//! draws, settings) plus the window, the input queues and the frame loop.
//! The `extern "C"` surface lives in `nova-bridge`; this crate never sees a
//! raw pointer.

pub mod camera;
pub mod config;
pub mod core;
#[cfg(desktop)]
pub mod device;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod platform;
pub mod settings;
pub mod textures;
pub mod time;
pub mod window;

pub use crate::config::EngineConfig;
pub use crate::core::Engine;
pub use crate::error::ContractViolation;
