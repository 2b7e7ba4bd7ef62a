//! Runs the engine in-process without the game client.
//!
//! Uploads a checkerboard atlas and one GUI quad, then pumps frames and logs
//! every input event until the window closes or the frame limit is hit.
//!
//! Usage: `nova-demo [CONFIG] [FRAMES]`

use anyhow::{Context, Result};
use nova_engine::config::DEFAULT_CONFIG_PATH;
use nova_engine::geometry::GuiUpload;
use nova_engine::logging::{init_logging, LoggingConfig};
use nova_engine::textures::{TextureUpload, UvRect};
use nova_engine::{Engine, EngineConfig};
use nova_wire::Settings;

const ATLAS: &str = "demo_atlas";
const SPRITE: &str = "minecraft:gui/demo";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let frame_limit = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("FRAMES must be a non-negative integer")?;

    let config = EngineConfig::load(&config_path)?.with_env_overrides();
    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });

    let mut engine = Engine::start(config);
    upload_scene(&mut engine)?;

    log::info!(
        "demo running, max texture size {}; close the window to stop",
        engine.max_texture_size()
    );

    while !engine.should_close() {
        if frame_limit.is_some_and(|n| engine.frame_count() >= n) {
            break;
        }
        engine.execute_frame();
        drain_events(&mut engine);
    }

    log::info!("diagnostics: {}", engine.shaders_and_filters().to_json());
    engine.shutdown();
    Ok(())
}

fn upload_scene(engine: &mut Engine) -> Result<()> {
    const SIZE: u32 = 16;
    let pixels = (0..SIZE * SIZE)
        .flat_map(|i| {
            let on = ((i % SIZE) / 4 + (i / SIZE) / 4) % 2 == 0;
            if on { [255, 0, 255, 255] } else { [0, 0, 0, 255] }
        })
        .collect();

    engine.add_texture(TextureUpload {
        name: ATLAS.to_string(),
        width: SIZE,
        height: SIZE,
        components: 4,
        pixels,
    })?;
    engine.add_texture_location(SPRITE.to_string(), UvRect { min: [0.0, 0.0], max: [0.5, 0.5] })?;

    #[rustfmt::skip]
    let quad = vec![
        0.0,   0.0,   0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0,
        100.0, 0.0,   0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0,
        100.0, 100.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
        0.0,   100.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    ];
    engine.add_gui_geometry(GuiUpload {
        texture_name: "textures/gui/demo.png".to_string(),
        atlas_name: ATLAS.to_string(),
        vertices: quad,
        indices: vec![0, 1, 2, 2, 3, 0],
    })?;

    engine.push_settings(&Settings {
        fog_color_red: 0.1,
        fog_color_green: 0.2,
        fog_color_blue: 0.4,
        render_distance: 8,
        ..Settings::default()
    });
    Ok(())
}

fn drain_events(engine: &mut Engine) {
    while let Some(ev) = engine.next_mouse_button_event() {
        log::info!("mouse button {:?}", ev);
    }
    while let Some(ev) = engine.next_mouse_position_event() {
        log::debug!("mouse position {}, {}", ev.x, ev.y);
    }
    while let Some(ev) = engine.next_mouse_scroll_event() {
        log::info!("scroll {}, {}", ev.x, ev.y);
    }
    while let Some(ev) = engine.next_key_press_event() {
        log::info!("key {} scancode {} {:?} mods {:#x}", ev.key, ev.scancode, ev.action, ev.modifiers.bits());
    }
    while let Some(ev) = engine.next_key_char_event() {
        log::info!("char {:?}", ev.0);
    }
}
