use crate::bridge::DisplayBridge;

/// A display mode as the old API describes it.
///
/// Only the size is meaningful; the engine picks colour depth and refresh rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: i32,
    pub frequency: i32,
}

impl DisplayMode {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height, bits_per_pixel: 32, frequency: 60 }
    }
}

/// Adapter answering legacy `Display` calls through a [`DisplayBridge`].
pub struct Display<B> {
    bridge: B,
}

impl<B: DisplayBridge> Display<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn width(&mut self) -> i32 {
        self.bridge.window_size().width
    }

    pub fn height(&mut self) -> i32 {
        self.bridge.window_size().height
    }

    pub fn is_active(&mut self) -> bool {
        self.bridge.display_is_active()
    }

    pub fn is_created(&mut self) -> bool {
        self.bridge.window_is_created()
    }

    pub fn is_close_requested(&mut self) -> bool {
        self.bridge.should_close()
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.bridge.set_fullscreen(fullscreen);
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.bridge.set_resizable(resizable);
    }

    pub fn set_title(&mut self, title: &str) {
        self.bridge.set_window_title(title);
    }

    /// The current window size.
    pub fn display_mode(&mut self) -> DisplayMode {
        let size = self.bridge.window_size();
        DisplayMode::new(size.width, size.height)
    }

    /// Same as [`Display::display_mode`]; the engine does not expose the desktop.
    pub fn desktop_display_mode(&mut self) -> DisplayMode {
        self.display_mode()
    }

    pub fn available_display_modes(&mut self) -> Vec<DisplayMode> {
        vec![self.display_mode()]
    }

    // The engine creates and owns the window; these are kept for callers.

    pub fn create(&mut self) {
        log::trace!("Display::create ignored, the engine owns the window");
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        log::trace!("Display::set_display_mode({mode:?}) ignored");
    }

    pub fn destroy(&mut self) {
        log::trace!("Display::destroy ignored");
    }

    /// Returns the number of icons used, always zero.
    pub fn set_icon(&mut self, icons: &[&[u8]]) -> usize {
        log::trace!("Display::set_icon ignored ({} images)", icons.len());
        0
    }

    pub fn sync(&mut self, fps: i32) {
        log::trace!("Display::sync({fps}) ignored, frame pacing is in execute_frame");
    }

    pub fn set_vsync_enabled(&mut self, enabled: bool) {
        log::trace!("Display::set_vsync_enabled({enabled}) ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nova_engine::{Engine, EngineConfig};
    use nova_wire::WindowSize;

    #[derive(Default)]
    struct FakeBridge {
        size: (i32, i32),
        active: bool,
        close: bool,
        fullscreen: Vec<bool>,
        titles: Vec<String>,
        resizable: Option<bool>,
        size_queries: usize,
    }

    impl DisplayBridge for FakeBridge {
        fn window_size(&mut self) -> WindowSize {
            self.size_queries += 1;
            WindowSize::new(self.size.0, self.size.1)
        }
        fn display_is_active(&mut self) -> bool {
            self.active
        }
        fn window_is_created(&mut self) -> bool {
            true
        }
        fn should_close(&mut self) -> bool {
            self.close
        }
        fn set_fullscreen(&mut self, fullscreen: bool) {
            self.fullscreen.push(fullscreen);
        }
        fn set_resizable(&mut self, resizable: bool) {
            self.resizable = Some(resizable);
        }
        fn set_window_title(&mut self, title: &str) {
            self.titles.push(title.to_owned());
        }
    }

    fn fake(w: i32, h: i32) -> Display<FakeBridge> {
        Display::new(FakeBridge { size: (w, h), ..FakeBridge::default() })
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[test]
    fn size_is_read_fresh_each_call() {
        let mut d = fake(854, 480);
        assert_eq!((d.width(), d.height()), (854, 480));
        d.bridge.size = (1920, 1080);
        assert_eq!(d.width(), 1920);
        assert_eq!(d.bridge.size_queries, 3);
    }

    #[test]
    fn flags_map_one_to_one() {
        let mut d = fake(1, 1);
        d.bridge.active = true;
        d.bridge.close = true;
        assert!(d.is_active());
        assert!(d.is_created());
        assert!(d.is_close_requested());
    }

    #[test]
    fn display_modes_mirror_the_window() {
        let mut d = fake(1280, 720);
        let mode = d.display_mode();
        assert_eq!((mode.width, mode.height), (1280, 720));
        assert_eq!(d.desktop_display_mode(), mode);
        assert_eq!(d.available_display_modes(), vec![mode]);
    }

    // ── setters ───────────────────────────────────────────────────────────

    #[test]
    fn setters_forward() {
        let mut d = fake(1, 1);
        d.set_fullscreen(true);
        d.set_fullscreen(false);
        d.set_title("Minecraft 1.10");
        d.set_resizable(true);
        assert_eq!(d.bridge.fullscreen, [true, false]);
        assert_eq!(d.bridge.titles, ["Minecraft 1.10"]);
        assert_eq!(d.bridge.resizable, Some(true));
    }

    #[test]
    fn ignored_calls_do_not_touch_the_bridge() {
        let mut d = fake(1, 1);
        d.create();
        d.set_display_mode(DisplayMode::new(640, 480));
        d.sync(60);
        d.set_vsync_enabled(true);
        assert_eq!(d.set_icon(&[&[0u8; 16]]), 0);
        d.destroy();

        let b = &d.bridge;
        assert!(b.fullscreen.is_empty() && b.titles.is_empty());
        assert_eq!(b.size_queries, 0);
    }

    // ── engine ────────────────────────────────────────────────────────────

    #[test]
    fn engine_backed_display() {
        let mut engine = Engine::start(EngineConfig::headless());
        {
            let mut d = Display::new(&mut engine);
            assert_eq!((d.width(), d.height()), (854, 480));
            assert!(d.is_created());
            d.set_fullscreen(true);
        }
        engine.execute_frame();

        let mut d = Display::new(&mut engine);
        assert_eq!(d.display_mode(), DisplayMode::new(1920, 1080));
        assert!(!d.is_close_requested());
    }
}
