/// A window change requested by the caller.
///
/// Commands are buffered and applied at the next frame boundary, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    SetFullscreen(bool),
    SetResizable(bool),
    SetTitle(String),
    SetMouseGrabbed(bool),
}

/// Commands buffered between frames.
#[derive(Debug, Default)]
pub struct WindowCommands {
    commands: Vec<WindowCommand>,
}

impl WindowCommands {
    pub fn set_fullscreen(&mut self, on: bool) {
        self.commands.push(WindowCommand::SetFullscreen(on));
    }

    pub fn set_resizable(&mut self, on: bool) {
        self.commands.push(WindowCommand::SetResizable(on));
    }

    pub fn set_title(&mut self, title: String) {
        self.commands.push(WindowCommand::SetTitle(title));
    }

    pub fn set_mouse_grabbed(&mut self, on: bool) {
        self.commands.push(WindowCommand::SetMouseGrabbed(on));
    }

    /// Takes every buffered command once the window exists. Until then they
    /// stay queued, so a title or fullscreen request sent right after
    /// `initialize` is not lost.
    pub fn drain_ready(&mut self, window: &WindowState) -> Vec<WindowCommand> {
        if !window.created {
            if !self.commands.is_empty() {
                log::debug!("window not created yet, holding {} command(s)", self.commands.len());
            }
            return Vec::new();
        }
        std::mem::take(&mut self.commands)
    }

}

/// What the engine knows about its window.
///
/// Platforms write into this while pumping events; the bridge only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub resizable: bool,
    pub fullscreen: bool,
    pub mouse_grabbed: bool,
    pub focused: bool,
    pub created: bool,
    pub close_requested: bool,
    /// Windowed size saved when fullscreen was entered.
    saved_windowed: Option<(u32, u32)>,
}

impl WindowState {
    pub fn new(title: impl Into<String>, width: u32, height: u32, resizable: bool) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            resizable,
            fullscreen: false,
            mouse_grabbed: false,
            focused: false,
            created: false,
            close_requested: false,
            saved_windowed: None,
        }
    }

    /// Records a switch into fullscreen at `monitor` size.
    ///
    /// Returns `false` when already fullscreen.
    pub fn enter_fullscreen(&mut self, monitor: (u32, u32)) -> bool {
        if self.fullscreen {
            return false;
        }
        self.saved_windowed = Some((self.width, self.height));
        self.fullscreen = true;
        (self.width, self.height) = monitor;
        true
    }

    /// Records a switch back to windowed mode and returns the size to restore.
    pub fn leave_fullscreen(&mut self) -> Option<(u32, u32)> {
        if !self.fullscreen {
            return None;
        }
        self.fullscreen = false;
        let restore = self.saved_windowed.take().unwrap_or((self.width, self.height));
        (self.width, self.height) = restore;
        Some(restore)
    }

    pub fn resized(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            log::debug!("window resized to {width}x{height}");
        }
        self.width = width;
        self.height = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_round_trip_restores_windowed_size() {
        let mut w = WindowState::new("t", 854, 480, true);
        assert!(w.enter_fullscreen((1920, 1080)));
        assert_eq!((w.width, w.height), (1920, 1080));

        assert_eq!(w.leave_fullscreen(), Some((854, 480)));
        assert_eq!((w.width, w.height), (854, 480));
        assert!(!w.fullscreen);
    }

    #[test]
    fn entering_twice_keeps_the_first_saved_size() {
        let mut w = WindowState::new("t", 800, 600, true);
        w.enter_fullscreen((1920, 1080));
        assert!(!w.enter_fullscreen((1920, 1080)));
        assert_eq!(w.leave_fullscreen(), Some((800, 600)));
    }

    #[test]
    fn leaving_while_windowed_is_a_no_op() {
        let mut w = WindowState::new("t", 800, 600, true);
        assert_eq!(w.leave_fullscreen(), None);
        assert_eq!((w.width, w.height), (800, 600));
    }

    #[test]
    fn commands_drain_in_call_order() {
        let mut w = WindowState::new("t", 800, 600, true);
        w.created = true;
        let mut c = WindowCommands::default();
        c.set_title("a".into());
        c.set_fullscreen(true);
        c.set_fullscreen(false);
        let got = c.drain_ready(&w);
        assert_eq!(
            got,
            [
                WindowCommand::SetTitle("a".into()),
                WindowCommand::SetFullscreen(true),
                WindowCommand::SetFullscreen(false),
            ]
        );
        assert!(c.drain_ready(&w).is_empty());
    }

    #[test]
    fn commands_wait_for_the_window() {
        let mut w = WindowState::new("t", 800, 600, true);
        let mut c = WindowCommands::default();
        c.set_title("early".into());
        c.set_mouse_grabbed(true);

        assert!(c.drain_ready(&w).is_empty());

        w.created = true;
        assert_eq!(
            c.drain_ready(&w),
            [WindowCommand::SetTitle("early".into()), WindowCommand::SetMouseGrabbed(true)]
        );
        assert!(c.drain_ready(&w).is_empty());
    }
}
