use std::time::Instant;

use nova_wire::Settings;

use crate::camera::PlayerCamera;
use crate::config::EngineConfig;
use crate::error::ContractViolation;
use crate::geometry::{ChunkUpload, GuiBuffers, GuiUpload, MeshStore};
use crate::input::{CharInput, InputEvent, InputQueues, KeyInput, MouseButtonInput, MousePosition, ScrollInput};
use crate::platform::{self, FrameView, Platform};
use crate::settings::RenderOptions;
use crate::textures::{TextureManager, TextureUpload, UvRect};
use crate::time::FrameClock;
use crate::window::{WindowCommands, WindowState};

use super::diagnostics::ShadersAndFilters;

pub struct Engine {
    config: EngineConfig,
    platform: Box<dyn Platform>,
    window: WindowState,
    commands: WindowCommands,
    input: InputQueues,
    textures: TextureManager,
    meshes: MeshStore,
    gui: GuiBuffers,
    options: RenderOptions,
    camera: PlayerCamera,
    clock: FrameClock,
    max_texture_size: Option<u32>,
}

impl Engine {
    /// Starts the engine with the given configuration.
    ///
    /// Never fails. If the window or GPU cannot be created the engine runs
    /// headless and [`Engine::should_close`] reports `true`.
    pub fn start(config: EngineConfig) -> Self {
        let wc = &config.window;
        let mut window = WindowState::new(wc.title.clone(), wc.width, wc.height, wc.resizable);
        let mut input = InputQueues::new(config.event_queue_capacity);

        let mut platform = platform::create(&config, &mut window);
        // First pump creates the window.
        platform.pump(&mut window, &mut input);

        log::info!(
            "engine started: platform {}, window {}x{}, shaderpack `{}`",
            platform.name(),
            window.width,
            window.height,
            config.loaded_shaderpack
        );

        Self {
            platform,
            window,
            commands: WindowCommands::default(),
            input,
            textures: TextureManager::new(),
            meshes: MeshStore::new(),
            gui: GuiBuffers::new(),
            options: RenderOptions::new(&config.loaded_shaderpack),
            camera: PlayerCamera::default(),
            clock: FrameClock::with_target(config.target_frame_time()),
            max_texture_size: None,
            config,
        }
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Runs one frame: staged chunk ops, window commands, event pump, render,
    /// then sleeps out the rest of the frame budget.
    pub fn execute_frame(&mut self) {
        let started = Instant::now();

        let applied = self.meshes.apply_staged();
        if applied > 0 {
            log::trace!("applied {applied} staged chunk ops");
        }

        for command in self.commands.drain_ready(&self.window) {
            log::debug!("window command {command:?}");
            self.platform.apply(command, &mut self.window);
        }

        self.platform.pump(&mut self.window, &mut self.input);
        self.input.report_drops();

        let view = FrameView {
            textures: &self.textures,
            meshes: &self.meshes,
            gui: &self.gui,
            options: &self.options,
            camera: &self.camera,
        };
        self.platform.render(&view, &mut self.window);

        self.clock.finish(started);
    }

    /// Consumes the engine. Dropping the platform closes the window.
    pub fn shutdown(self) {
        log::info!(
            "engine shutting down after {} frames ({} over budget)",
            self.clock.frame_count(),
            self.clock.overruns()
        );
    }

    // ── uploads ───────────────────────────────────────────────────────────

    pub fn add_texture(&mut self, upload: TextureUpload) -> Result<(), ContractViolation> {
        self.textures.add_texture(upload)
    }

    pub fn add_texture_location(&mut self, name: String, rect: UvRect) -> Result<(), ContractViolation> {
        self.textures.add_texture_location(name, rect)
    }

    pub fn reset_texture_manager(&mut self) {
        self.textures.reset();
    }

    /// Device texture limit once a device exists, the configured fallback before.
    pub fn max_texture_size(&mut self) -> u32 {
        if let Some(size) = self.max_texture_size {
            return size;
        }
        match self.platform.max_texture_size() {
            Some(size) => {
                self.max_texture_size = Some(size);
                size
            }
            None => self.config.fallback_max_texture_size,
        }
    }

    pub fn send_lightmap(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), ContractViolation> {
        self.textures.send_lightmap(pixels, width, height)
    }

    pub fn add_chunk_geometry(&mut self, filter: String, upload: ChunkUpload) -> Result<(), ContractViolation> {
        self.meshes.stage_add(filter, upload)
    }

    pub fn remove_chunk_geometry(&mut self, filter: String, id: i32) {
        self.meshes.stage_remove(filter, id);
    }

    pub fn add_gui_geometry(&mut self, upload: GuiUpload) -> Result<(), ContractViolation> {
        self.gui.add(upload, &self.textures)
    }

    pub fn clear_gui_buffers(&mut self) {
        self.gui.clear();
    }

    pub fn set_string_setting(&mut self, key: &str, value: &str) {
        self.options.set_string(key, value);
    }

    pub fn set_float_setting(&mut self, key: &str, value: f32) {
        self.options.set_float(key, value);
    }

    pub fn push_settings(&mut self, settings: &Settings) {
        log::debug!("settings snapshot: {settings:?}");
        self.options.apply_snapshot(settings);
    }

    pub fn set_player_camera_transform(&mut self, x: f64, y: f64, z: f64, yaw: f64, pitch: f64) {
        self.camera = PlayerCamera::new(x, y, z, yaw, pitch);
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Injects an event as if the platform had delivered it.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn next_mouse_button_event(&mut self) -> Option<MouseButtonInput> {
        self.input.next_mouse_button()
    }

    pub fn next_mouse_position_event(&mut self) -> Option<MousePosition> {
        self.input.next_mouse_position()
    }

    pub fn next_mouse_scroll_event(&mut self) -> Option<ScrollInput> {
        self.input.next_mouse_scroll()
    }

    pub fn next_key_press_event(&mut self) -> Option<KeyInput> {
        self.input.next_key_press()
    }

    pub fn next_key_char_event(&mut self) -> Option<CharInput> {
        self.input.next_key_char()
    }

    pub fn dropped_events(&self) -> u64 {
        self.input.dropped()
    }

    // ── window ────────────────────────────────────────────────────────────

    pub fn should_close(&self) -> bool {
        self.window.close_requested
    }

    pub fn display_is_active(&self) -> bool {
        self.window.created && self.window.focused
    }

    pub fn window_is_created(&self) -> bool {
        self.window.created
    }

    /// `(width, height)` in physical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window.width, self.window.height)
    }

    pub fn window_title(&self) -> &str {
        &self.window.title
    }

    pub fn mouse_grabbed(&self) -> bool {
        self.window.mouse_grabbed
    }

    pub fn set_fullscreen(&mut self, on: bool) {
        self.commands.set_fullscreen(on);
    }

    pub fn set_resizable(&mut self, on: bool) {
        self.commands.set_resizable(on);
    }

    pub fn set_window_title(&mut self, title: String) {
        self.commands.set_title(title);
    }

    pub fn set_mouse_grabbed(&mut self, on: bool) {
        self.commands.set_mouse_grabbed(on);
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn shaders_and_filters(&self) -> ShadersAndFilters {
        ShadersAndFilters::collect(self.options.loaded_shaderpack(), &self.config.materials, &self.meshes)
    }

    pub fn textures(&self) -> &TextureManager {
        &self.textures
    }

    pub fn meshes(&self) -> &MeshStore {
        &self.meshes
    }

    pub fn gui(&self) -> &GuiBuffers {
        &self.gui
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn camera(&self) -> &PlayerCamera {
        &self.camera
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}
