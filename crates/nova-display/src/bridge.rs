use nova_engine::Engine;
use nova_wire::WindowSize;

/// The slice of the bridge contract the display adapter needs.
pub trait DisplayBridge {
    fn window_size(&mut self) -> WindowSize;
    fn display_is_active(&mut self) -> bool;
    fn window_is_created(&mut self) -> bool;
    fn should_close(&mut self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_resizable(&mut self, resizable: bool);
    fn set_window_title(&mut self, title: &str);
}

impl DisplayBridge for Engine {
    fn window_size(&mut self) -> WindowSize {
        let (w, h) = Engine::window_size(self);
        WindowSize::new(
            i32::try_from(w).unwrap_or(i32::MAX),
            i32::try_from(h).unwrap_or(i32::MAX),
        )
    }

    fn display_is_active(&mut self) -> bool {
        Engine::display_is_active(self)
    }

    fn window_is_created(&mut self) -> bool {
        Engine::window_is_created(self)
    }

    fn should_close(&mut self) -> bool {
        Engine::should_close(self)
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        Engine::set_fullscreen(self, fullscreen);
    }

    fn set_resizable(&mut self, resizable: bool) {
        Engine::set_resizable(self, resizable);
    }

    fn set_window_title(&mut self, title: &str) {
        Engine::set_window_title(self, title.to_owned());
    }
}

impl<B: DisplayBridge + ?Sized> DisplayBridge for &mut B {
    fn window_size(&mut self) -> WindowSize {
        (**self).window_size()
    }

    fn display_is_active(&mut self) -> bool {
        (**self).display_is_active()
    }

    fn window_is_created(&mut self) -> bool {
        (**self).window_is_created()
    }

    fn should_close(&mut self) -> bool {
        (**self).should_close()
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        (**self).set_fullscreen(fullscreen);
    }

    fn set_resizable(&mut self, resizable: bool) {
        (**self).set_resizable(resizable);
    }

    fn set_window_title(&mut self, title: &str) {
        (**self).set_window_title(title);
    }
}
