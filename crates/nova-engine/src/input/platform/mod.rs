//! Platform-specific input translation.

pub(crate) mod winit;
