//! Input subsystem.
//!
//! Platform code translates window-system events into [`InputEvent`]s and
//! pushes them into [`InputQueues`]; the bridge drains one queue per event
//! kind. Public types here do not expose winit.

#[cfg(desktop)]
pub(crate) mod platform;
mod queue;
mod state;
mod types;

pub use queue::BoundedQueue;
pub use state::InputQueues;
pub use types::{
    CharInput,
    InputEvent,
    KeyAction,
    KeyInput,
    Modifiers,
    MouseButton,
    MouseButtonInput,
    MousePosition,
    ScrollInput,
};
