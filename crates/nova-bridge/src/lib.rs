//! C ABI of the Nova renderer.
//!
//! Loaded by the managed client as `nova_renderer`. Every function here runs
//! on the caller's thread against that thread's engine (see [`slot`]).
//!
//! Struct arguments are passed by pointer and only read during the call;
//! anything the engine keeps is copied first. Event polls and
//! `get_window_size` return their wire struct by value.
//!
//! A broken contract (a call before `initialize`, a second `initialize`, a
//! malformed buffer) is logged and aborts the process. Nothing is reported
//! back through return values.

mod convert;
mod slot;

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use nova_engine::config::DEFAULT_CONFIG_PATH;
use nova_engine::logging::{init_logging, LoggingConfig};
use nova_engine::{ContractViolation, Engine, EngineConfig};
use nova_wire::{
    AtlasLocation, AtlasTexture, ChunkRenderObject, GuiBuffer, KeyCharEvent, KeyPressEvent,
    MouseButtonEvent, MousePositionEvent, MouseScrollEvent, NativeBool, Sentinel, Settings,
    WindowSize, NATIVE_FALSE, NATIVE_TRUE,
};

thread_local! {
    static SHADERS_AND_FILTERS: RefCell<CString> = RefCell::new(CString::default());
}

fn or_abort<T>(result: Result<T, ContractViolation>) -> T {
    match result {
        Ok(v) => v,
        Err(violation) => {
            // The violation may come before initialize() set up logging.
            init_logging(LoggingConfig::default());
            log::error!("bridge contract violation: {violation}");
            std::process::abort()
        }
    }
}

fn engine<R>(call: &'static str, f: impl FnOnce(&mut Engine) -> R) -> R {
    or_abort(slot::with_engine(call, f))
}

/// Like [`engine`] for calls whose body can itself violate the contract.
fn engine_try<R>(call: &'static str, f: impl FnOnce(&mut Engine) -> Result<R, ContractViolation>) -> R {
    or_abort(slot::with_engine(call, f).and_then(|r| r))
}

fn native_bool(b: bool) -> NativeBool {
    if b { NATIVE_TRUE } else { NATIVE_FALSE }
}

fn window_size_of(engine: &Engine) -> WindowSize {
    let (w, h) = engine.window_size();
    WindowSize::new(
        i32::try_from(w).unwrap_or(i32::MAX),
        i32::try_from(h).unwrap_or(i32::MAX),
    )
}

fn load_config() -> EngineConfig {
    let (config, error) = match EngineConfig::load(DEFAULT_CONFIG_PATH) {
        Ok(c) => (c, None),
        Err(e) => (EngineConfig::default(), Some(e)),
    };
    let config = config.with_env_overrides();

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    if let Some(e) = error {
        log::error!("{e:#}; using default configuration");
    }
    config
}

/// Starts the engine on the calling thread with an explicit configuration.
///
/// [`initialize`] does the same with the configuration read from
/// `config/config.json`. Aborts if the engine is already running.
pub fn initialize_with_config(config: EngineConfig) {
    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });
    or_abort(slot::initialize(config));
}

/// Whether this thread's engine is running.
pub fn is_initialized() -> bool {
    slot::is_initialized()
}

// ── lifecycle ─────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn initialize() {
    let config = load_config();
    or_abort(slot::initialize(config));
}

#[unsafe(no_mangle)]
pub extern "C" fn execute_frame() {
    engine("execute_frame", Engine::execute_frame);
}

#[unsafe(no_mangle)]
pub extern "C" fn shutdown() {
    or_abort(slot::shutdown("shutdown"));
}

#[unsafe(no_mangle)]
pub extern "C" fn layout_version() -> u32 {
    nova_wire::layout_version()
}

#[unsafe(no_mangle)]
pub extern "C" fn should_close() -> NativeBool {
    engine("should_close", |e| native_bool(e.should_close()))
}

// ── window ────────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn get_window_size() -> WindowSize {
    engine("get_window_size", |e| window_size_of(e))
}

#[unsafe(no_mangle)]
pub extern "C" fn display_is_active() -> NativeBool {
    engine("display_is_active", |e| native_bool(e.display_is_active()))
}

#[unsafe(no_mangle)]
pub extern "C" fn window_is_created() -> NativeBool {
    engine("window_is_created", |e| native_bool(e.window_is_created()))
}

#[unsafe(no_mangle)]
pub extern "C" fn set_fullscreen(fullscreen: NativeBool) {
    engine("set_fullscreen", |e| e.set_fullscreen(fullscreen != NATIVE_FALSE));
}

#[unsafe(no_mangle)]
pub extern "C" fn set_resizable(resizable: NativeBool) {
    engine("set_resizable", |e| e.set_resizable(resizable != NATIVE_FALSE));
}

/// # Safety
/// `title` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_window_title(title: *const c_char) {
    let title = or_abort(unsafe { convert::string(title, "set_window_title") });
    engine("set_window_title", |e| e.set_window_title(title));
}

#[unsafe(no_mangle)]
pub extern "C" fn set_mouse_grabbed(grabbed: NativeBool) {
    engine("set_mouse_grabbed", |e| e.set_mouse_grabbed(grabbed != NATIVE_FALSE));
}

// ── textures ──────────────────────────────────────────────────────────────

/// # Safety
/// `texture` must point to a valid `mc_atlas_texture` whose pointers satisfy
/// its contract for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn add_texture(texture: *const AtlasTexture) {
    engine_try("add_texture", |e| {
        let tex = unsafe { convert::arg(texture, "add_texture") }?;
        let upload = unsafe { convert::texture_upload(tex) }?;
        e.add_texture(upload)
    });
}

/// # Safety
/// `location` must point to a valid `mc_texture_atlas_location`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn add_texture_location(location: *const AtlasLocation) {
    engine_try("add_texture_location", |e| {
        let loc = unsafe { convert::arg(location, "add_texture_location") }?;
        let (name, rect) = unsafe { convert::location(loc) }?;
        e.add_texture_location(name, rect)
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn get_max_texture_size() -> i32 {
    engine("get_max_texture_size", |e| i32::try_from(e.max_texture_size()).unwrap_or(i32::MAX))
}

#[unsafe(no_mangle)]
pub extern "C" fn reset_texture_manager() {
    engine("reset_texture_manager", Engine::reset_texture_manager);
}

/// # Safety
/// `data` must be valid for `length` reads.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn send_lightmap_texture(data: *const i32, length: i32, width: i32, height: i32) {
    engine_try("send_lightmap_texture", |e| {
        let pixels = unsafe { convert::lightmap(data, length) }?;
        let width = convert::dimension(width, "send_lightmap_texture: width")?;
        let height = convert::dimension(height, "send_lightmap_texture: height")?;
        e.send_lightmap(&pixels, width, height)
    });
}

// ── geometry ──────────────────────────────────────────────────────────────

/// # Safety
/// `filter_name` must be a valid string and `render_object` must point to a
/// valid `mc_chunk_render_object`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn add_chunk_geometry_for_filter(
    filter_name: *const c_char,
    render_object: *const ChunkRenderObject,
) {
    engine_try("add_chunk_geometry_for_filter", |e| {
        let filter = unsafe { convert::string(filter_name, "add_chunk_geometry_for_filter: filter") }?;
        let obj = unsafe { convert::arg(render_object, "add_chunk_geometry_for_filter") }?;
        let upload = unsafe { convert::chunk_upload(obj) }?;
        e.add_chunk_geometry(filter, upload)
    });
}

/// Only the `id` of `render_object` is read.
///
/// # Safety
/// As for [`add_chunk_geometry_for_filter`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn remove_chunk_geometry_for_filter(
    filter_name: *const c_char,
    render_object: *const ChunkRenderObject,
) {
    engine_try("remove_chunk_geometry_for_filter", |e| {
        let filter = unsafe { convert::string(filter_name, "remove_chunk_geometry_for_filter: filter") }?;
        let obj = unsafe { convert::arg(render_object, "remove_chunk_geometry_for_filter") }?;
        e.remove_chunk_geometry(filter, obj.id);
        Ok(())
    });
}

/// # Safety
/// `buffer` must point to a valid `mc_gui_buffer`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn add_gui_geometry(buffer: *const GuiBuffer) {
    engine_try("add_gui_geometry", |e| {
        let buf = unsafe { convert::arg(buffer, "add_gui_geometry") }?;
        let upload = unsafe { convert::gui_upload(buf) }?;
        e.add_gui_geometry(upload)
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn clear_gui_buffers() {
    engine("clear_gui_buffers", Engine::clear_gui_buffers);
}

// ── settings ──────────────────────────────────────────────────────────────

/// # Safety
/// Both arguments must be valid NUL-terminated strings.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_string_setting(setting: *const c_char, value: *const c_char) {
    engine_try("set_string_setting", |e| {
        let key = unsafe { convert::string(setting, "set_string_setting: setting") }?;
        let value = unsafe { convert::string(value, "set_string_setting: value") }?;
        e.set_string_setting(&key, &value);
        Ok(())
    });
}

/// # Safety
/// `setting_name` must be a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn set_float_setting(setting_name: *const c_char, setting_value: f32) {
    engine_try("set_float_setting", |e| {
        let key = unsafe { convert::string(setting_name, "set_float_setting: setting") }?;
        e.set_float_setting(&key, setting_value);
        Ok(())
    });
}

/// # Safety
/// `settings` must point to a valid `mc_settings`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn push_settings(settings: *const Settings) {
    engine_try("push_settings", |e| {
        let settings = unsafe { convert::arg(settings, "push_settings") }?;
        e.push_settings(settings);
        Ok(())
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn set_player_camera_transform(x: f64, y: f64, z: f64, yaw: f32, pitch: f32) {
    engine("set_player_camera_transform", |e| {
        e.set_player_camera_transform(x, y, z, f64::from(yaw), f64::from(pitch))
    });
}

// ── input ─────────────────────────────────────────────────────────────────

#[unsafe(no_mangle)]
pub extern "C" fn get_next_mouse_button_event() -> MouseButtonEvent {
    engine("get_next_mouse_button_event", |e| {
        MouseButtonEvent::from_option(e.next_mouse_button_event().map(Into::into))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn get_next_mouse_position_event() -> MousePositionEvent {
    engine("get_next_mouse_position_event", |e| {
        MousePositionEvent::from_option(e.next_mouse_position_event().map(Into::into))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn get_next_mouse_scroll_event() -> MouseScrollEvent {
    engine("get_next_mouse_scroll_event", |e| {
        MouseScrollEvent::from_option(e.next_mouse_scroll_event().map(Into::into))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn get_next_key_press_event() -> KeyPressEvent {
    engine("get_next_key_press_event", |e| {
        KeyPressEvent::from_option(e.next_key_press_event().map(Into::into))
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn get_next_key_char_event() -> KeyCharEvent {
    engine("get_next_key_char_event", |e| {
        KeyCharEvent::from_option(e.next_key_char_event().map(Into::into))
    })
}

// ── diagnostics ───────────────────────────────────────────────────────────

/// JSON list of materials and live chunk filters.
///
/// The returned string is owned by the bridge and stays valid until the next
/// call to this function on the same thread.
#[unsafe(no_mangle)]
pub extern "C" fn get_shaders_and_filters() -> *const c_char {
    let json = engine("get_shaders_and_filters", |e| e.shaders_and_filters().to_json());
    // serde_json escapes NUL, so this only fails on a serializer bug.
    let json = CString::new(json).unwrap_or_default();
    SHADERS_AND_FILTERS.with(|cell| {
        let mut slot = cell.borrow_mut();
        *slot = json;
        slot.as_ptr()
    })
}

/// Runs `f` against this thread's engine. Aborts before `initialize`.
///
/// For in-process tools that link the bridge as a Rust library.
pub fn with_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> R {
    engine("with_engine", f)
}
