use crate::config::EngineConfig;
use crate::input::InputQueues;
use crate::window::{WindowCommand, WindowState};

use super::{FrameView, Platform};

/// A platform with no window system and no GPU.
///
/// Window commands are applied to the engine's window state directly, so
/// queries behave as if a window existed. Used by tests, tools and servers.
pub struct HeadlessPlatform {
    monitor: (u32, u32),
    frames: u64,
}

impl HeadlessPlatform {
    pub fn new(config: &EngineConfig, window: &mut WindowState) -> Self {
        log::info!("starting headless platform");
        window.created = true;
        window.focused = true;
        Self {
            monitor: (config.window.fullscreen_width, config.window.fullscreen_height),
            frames: 0,
        }
    }
}

impl Platform for HeadlessPlatform {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn max_texture_size(&self) -> Option<u32> {
        None
    }

    fn apply(&mut self, command: WindowCommand, window: &mut WindowState) {
        match command {
            WindowCommand::SetFullscreen(true) => {
                window.enter_fullscreen(self.monitor);
            }
            WindowCommand::SetFullscreen(false) => {
                window.leave_fullscreen();
            }
            WindowCommand::SetResizable(on) => window.resizable = on,
            WindowCommand::SetTitle(title) => window.title = title,
            WindowCommand::SetMouseGrabbed(on) => window.mouse_grabbed = on,
        }
    }

    fn pump(&mut self, _window: &mut WindowState, _input: &mut InputQueues) {}

    fn render(&mut self, frame: &FrameView<'_>, _window: &mut WindowState) {
        self.frames += 1;
        log::trace!(
            "headless frame {}: camera at {:?}, {} pages, {} filters, {} gui draws",
            self.frames,
            frame.camera.position,
            frame.textures.page_count(),
            frame.meshes.filters().count(),
            frame.gui.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (HeadlessPlatform, WindowState) {
        let mut window = WindowState::new("t", 854, 480, true);
        let p = HeadlessPlatform::new(&EngineConfig::headless(), &mut window);
        (p, window)
    }

    #[test]
    fn reports_a_created_focused_window() {
        let (p, w) = setup();
        assert!(w.created && w.focused);
        assert_eq!(p.max_texture_size(), None);
    }

    #[test]
    fn fullscreen_uses_the_configured_monitor() {
        let (mut p, mut w) = setup();
        p.apply(WindowCommand::SetFullscreen(true), &mut w);
        assert_eq!((w.width, w.height), (1920, 1080));
        p.apply(WindowCommand::SetFullscreen(false), &mut w);
        assert_eq!((w.width, w.height), (854, 480));
    }

    #[test]
    fn title_and_grab_are_recorded() {
        let (mut p, mut w) = setup();
        p.apply(WindowCommand::SetTitle("Nova".into()), &mut w);
        p.apply(WindowCommand::SetMouseGrabbed(true), &mut w);
        p.apply(WindowCommand::SetResizable(false), &mut w);
        assert_eq!(w.title, "Nova");
        assert!(w.mouse_grabbed);
        assert!(!w.resizable);
    }
}
