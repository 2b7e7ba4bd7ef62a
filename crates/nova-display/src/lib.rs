//! The legacy `Display` API on top of the Nova bridge.
//!
//! The game client was written against a windowing library that owned the
//! window. With Nova the engine owns it, so this adapter answers the old
//! calls from bridge queries and forwards the few setters that still mean
//! something. The rest are accepted and ignored.

mod bridge;
mod display;

pub use bridge::DisplayBridge;
pub use display::{Display, DisplayMode};
