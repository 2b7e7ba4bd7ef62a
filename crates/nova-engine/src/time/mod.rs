//! Time subsystem.
//!
//! One `FrameClock` per engine instance; `execute_frame` finishes each frame
//! through it, which paces against the configured frame budget.

mod frame_clock;

pub use frame_clock::FrameClock;
