use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, Fullscreen, Window, WindowId};

use crate::config::{EngineConfig, WindowConfig};
use crate::device::{Gpu, GpuResidency};
use crate::input::platform::winit::{translate_mouse_motion, translate_window_event};
use crate::input::InputQueues;
use crate::window::{WindowCommand, WindowState};

use super::{FrameView, Platform};

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// winit window plus wgpu device, pumped from the caller's thread.
///
/// The event loop is never run; `execute_frame` pumps it with a zero timeout
/// so the caller keeps control of its own frame loop.
pub struct DesktopPlatform {
    event_loop: EventLoop<()>,
    config: WindowConfig,
    vsync: bool,
    entry: Option<WindowEntry>,
    residency: GpuResidency,
}

impl DesktopPlatform {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let event_loop = build_event_loop()?;
        log::info!("starting desktop platform");

        Ok(Self {
            event_loop,
            config: config.window.clone(),
            vsync: config.vsync,
            entry: None,
            residency: GpuResidency::new(),
        })
    }

    fn fullscreen_size(&self, window: &Window) -> (u32, u32) {
        window
            .current_monitor()
            .map(|m| {
                let s = m.size();
                (s.width, s.height)
            })
            .unwrap_or((self.config.fullscreen_width, self.config.fullscreen_height))
    }
}

fn build_event_loop() -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    // The caller owns the main thread; winit refuses other threads by default.
    #[cfg(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))))]
    {
        use winit::platform::wayland::EventLoopBuilderExtWayland;
        use winit::platform::x11::EventLoopBuilderExtX11;
        EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }
    #[cfg(windows)]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        builder.with_any_thread(true);
    }

    builder.build().context("failed to create winit EventLoop")
}

fn create_window_entry(
    event_loop: &ActiveEventLoop,
    config: &WindowConfig,
    vsync: bool,
) -> Result<WindowEntry> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_resizable(config.resizable);

    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;

    WindowEntryTryBuilder {
        window,
        gpu_builder: |w| pollster::block_on(Gpu::new(w, vsync)),
    }
    .try_build()
    .context("GPU initialization failed for window")
}

/// Borrowed engine state for the duration of one pump.
struct Pump<'a> {
    config: &'a WindowConfig,
    vsync: bool,
    entry: &'a mut Option<WindowEntry>,
    window: &'a mut WindowState,
    input: &'a mut InputQueues,
}

impl ApplicationHandler for Pump<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match create_window_entry(event_loop, self.config, self.vsync) {
            Ok(entry) => {
                let size = entry.with_window(|w| w.inner_size());
                self.window.resized(size.width, size.height);
                self.window.created = true;
                *self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create the game window: {e:#}");
                self.window.close_requested = true;
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // While grabbed the cursor position is synthesized from raw motion.
        let grabbed_move = self.window.mouse_grabbed && matches!(event, WindowEvent::CursorMoved { .. });
        if !grabbed_move {
            translate_window_event(&event, self.input);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.window.close_requested = true;
            }
            WindowEvent::Destroyed => {
                self.window.created = false;
                self.window.close_requested = true;
            }
            WindowEvent::Focused(focused) => self.window.focused = focused,
            WindowEvent::Resized(size) => {
                self.window.resized(size.width, size.height);
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let size = entry.with_window(|w| w.inner_size());
                    self.window.resized(size.width, size.height);
                    entry.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if !(self.window.mouse_grabbed && self.window.focused) {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            translate_mouse_motion(delta, self.input);
        }
    }
}

impl Platform for DesktopPlatform {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn max_texture_size(&self) -> Option<u32> {
        self.entry
            .as_ref()
            .map(|e| e.with_gpu(|gpu| gpu.max_texture_dimension()))
    }

    fn apply(&mut self, command: WindowCommand, state: &mut WindowState) {
        let Some(entry) = self.entry.as_ref() else {
            log::debug!("no window yet, dropping {command:?}");
            return;
        };
        let monitor = entry.with_window(|w| self.fullscreen_size(w));

        entry.with_window(|w| match command {
            WindowCommand::SetFullscreen(true) => {
                if state.enter_fullscreen(monitor) {
                    w.set_fullscreen(Some(Fullscreen::Borderless(None)));
                }
            }
            WindowCommand::SetFullscreen(false) => {
                if let Some((width, height)) = state.leave_fullscreen() {
                    w.set_fullscreen(None);
                    let _ = w.request_inner_size(PhysicalSize::new(width, height));
                }
            }
            WindowCommand::SetResizable(on) => {
                w.set_resizable(on);
                state.resizable = on;
            }
            WindowCommand::SetTitle(title) => {
                w.set_title(&title);
                state.title = title;
            }
            WindowCommand::SetMouseGrabbed(on) => {
                let res = if on {
                    w.set_cursor_grab(CursorGrabMode::Locked)
                        .or_else(|_| w.set_cursor_grab(CursorGrabMode::Confined))
                } else {
                    w.set_cursor_grab(CursorGrabMode::None)
                };
                if let Err(e) = res {
                    log::warn!("cursor grab change failed: {e}");
                }
                w.set_cursor_visible(!on);
                state.mouse_grabbed = on;
            }
        });
    }

    fn pump(&mut self, window: &mut WindowState, input: &mut InputQueues) {
        let mut pump = Pump {
            config: &self.config,
            vsync: self.vsync,
            entry: &mut self.entry,
            window,
            input,
        };

        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut pump) {
            log::info!("event loop exited with code {code}");
            pump.window.close_requested = true;
        }
    }

    fn render(&mut self, frame: &FrameView<'_>, window: &mut WindowState) {
        let Some(entry) = self.entry.as_mut() else { return };
        let residency = &mut self.residency;

        let outcome = entry.with_gpu_mut(|gpu| {
            residency.sync(gpu.device(), gpu.queue(), frame.textures, frame.meshes);
            gpu.draw_frame(frame.options.fog_color())
        });
        outcome.apply(window);
    }
}
