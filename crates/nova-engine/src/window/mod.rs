//! Engine-owned window state and the command buffer the bridge writes into.

mod state;

pub use state::{WindowCommand, WindowCommands, WindowState};
