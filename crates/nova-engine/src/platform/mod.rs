//! Window-system and GPU backends behind one trait.
//!
//! The engine owns exactly one [`Platform`]. `execute_frame` drives it in a
//! fixed order: buffered window commands, event pump, render.

#[cfg(desktop)]
mod desktop;
mod headless;

#[cfg(desktop)]
pub use desktop::DesktopPlatform;
pub use headless::HeadlessPlatform;

use crate::camera::PlayerCamera;
use crate::config::EngineConfig;
use crate::geometry::{GuiBuffers, MeshStore};
use crate::input::InputQueues;
use crate::settings::RenderOptions;
use crate::textures::TextureManager;
use crate::window::{WindowCommand, WindowState};

/// Read-only view of everything a frame renders from.
pub struct FrameView<'a> {
    pub textures: &'a TextureManager,
    pub meshes: &'a MeshStore,
    pub gui: &'a GuiBuffers,
    pub options: &'a RenderOptions,
    pub camera: &'a PlayerCamera,
}

pub trait Platform {
    fn name(&self) -> &'static str;

    /// Device texture limit, once a device exists.
    fn max_texture_size(&self) -> Option<u32>;

    fn apply(&mut self, command: WindowCommand, window: &mut WindowState);

    /// Delivers pending window-system events without blocking.
    fn pump(&mut self, window: &mut WindowState, input: &mut InputQueues);

    /// Renders one frame. Unrecoverable failures set `window.close_requested`.
    fn render(&mut self, frame: &FrameView<'_>, window: &mut WindowState);
}

/// Creates the configured platform.
///
/// Never fails: if the desktop platform cannot start, the error is logged,
/// the headless platform is used instead and the window reports that it
/// should close.
pub fn create(config: &EngineConfig, window: &mut WindowState) -> Box<dyn Platform> {
    if !config.headless {
        #[cfg(desktop)]
        match DesktopPlatform::new(config) {
            Ok(p) => return Box::new(p),
            Err(e) => {
                log::error!("failed to start the desktop platform: {e:#}");
                window.close_requested = true;
            }
        }

        #[cfg(not(desktop))]
        log::warn!("no desktop platform on this target, running headless");
    }

    Box::new(HeadlessPlatform::new(config, window))
}
