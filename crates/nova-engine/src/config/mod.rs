//! Engine configuration.
//!
//! Read once at `initialize()` from `config/config.json` relative to the
//! working directory of the host process. Every field has a default, so a
//! missing file or a partial file is fine.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use nova_wire::GeometryType;
use serde::Deserialize;

/// Location the host process is expected to keep the renderer config at.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

/// Setting this to `1` or `true` selects the headless platform.
pub const HEADLESS_ENV: &str = "NOVA_HEADLESS";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub window: WindowConfig,

    /// Shaderpack reported by diagnostics until the caller overrides it
    /// through the `loadedShaderpack` string setting.
    pub loaded_shaderpack: String,

    /// Maximum pending events per input queue. Overflow drops the oldest event.
    pub event_queue_capacity: usize,

    /// Minimum wall time of one `execute_frame`. `None` leaves pacing to the
    /// swapchain present mode.
    pub target_frame_time_ms: Option<f64>,

    /// Reported by `get_max_texture_size` while no GPU device exists.
    pub fallback_max_texture_size: u32,

    /// Run without a window or GPU.
    pub headless: bool,

    /// Present on vertical blank. Off lets `targetFrameTimeMs` alone pace frames.
    pub vsync: bool,

    /// `env_logger` filter; `RUST_LOG` is used when absent.
    pub log_filter: Option<String>,

    pub materials: Vec<MaterialConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            loaded_shaderpack: "default".to_string(),
            event_queue_capacity: 256,
            target_frame_time_ms: None,
            fallback_max_texture_size: 8192,
            headless: false,
            vsync: true,
            log_filter: None,
            materials: default_materials(),
        }
    }
}

impl EngineConfig {
    /// Parses a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid engine config")
    }

    /// Applies environment overrides on top of the file contents.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var(HEADLESS_ENV) {
            self.headless = matches!(v.trim(), "1" | "true" | "TRUE" | "yes");
        }
        self
    }

    pub fn target_frame_time(&self) -> Option<Duration> {
        self.target_frame_time_ms
            .filter(|ms| ms.is_finite() && *ms > 0.0)
            .map(|ms| Duration::from_secs_f64(ms / 1000.0))
    }

    /// Convenience for tests and tools.
    pub fn headless() -> Self {
        Self {
            headless: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    /// Monitor size assumed by the headless platform when entering fullscreen.
    pub fullscreen_width: u32,
    pub fullscreen_height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Minecraft Nova".to_string(),
            width: 854,
            height: 480,
            resizable: true,
            fullscreen_width: 1920,
            fullscreen_height: 1080,
        }
    }
}

/// One material of the loaded shaderpack: which pass draws it and which
/// geometry it selects.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct MaterialConfig {
    pub name: String,
    pub pass: String,
    pub filter: String,
}

impl MaterialConfig {
    fn new(name: &str, pass: &str, geometry: GeometryType) -> Self {
        Self {
            name: name.to_string(),
            pass: pass.to_string(),
            filter: format!("geometry_type::{}", geometry.name()),
        }
    }
}

fn default_materials() -> Vec<MaterialConfig> {
    use GeometryType::*;

    vec![
        MaterialConfig::new("gbuffers_terrain", "forward", Block),
        MaterialConfig::new("gbuffers_entities", "forward", Entity),
        MaterialConfig::new("gbuffers_falling_block", "forward", FallingBlock),
        MaterialConfig::new("gbuffers_clouds", "forward", Cloud),
        MaterialConfig::new("gbuffers_skytextured", "sky", SkyDecoration),
        MaterialConfig::new("gbuffers_selection", "forward", SelectionBox),
        MaterialConfig::new("gbuffers_glint", "transparent", Glint),
        MaterialConfig::new("gbuffers_weather", "transparent", Weather),
        MaterialConfig::new("gbuffers_hand", "hand", Hand),
        MaterialConfig::new("gbuffers_particles", "transparent", Particle),
        MaterialConfig::new("gbuffers_lit_particles", "transparent", LitParticle),
        MaterialConfig::new("gbuffers_eyes", "transparent", Eyes),
        MaterialConfig::new("gui", "gui", Gui),
        MaterialConfig::new("final", "final", FullscreenQuad),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = EngineConfig::from_json(
            r#"{ "loadedShaderpack": "BSL", "window": { "title": "test" }, "eventQueueCapacity": 8 }"#,
        )
        .unwrap();
        assert_eq!(cfg.loaded_shaderpack, "BSL");
        assert_eq!(cfg.window.title, "test");
        assert_eq!(cfg.window.width, 854);
        assert_eq!(cfg.event_queue_capacity, 8);
        assert!(!cfg.materials.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = EngineConfig::load("does/not/exist/config.json").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn frame_time_ignores_non_positive() {
        let mut cfg = EngineConfig::default();
        assert_eq!(cfg.target_frame_time(), None);

        cfg.target_frame_time_ms = Some(0.0);
        assert_eq!(cfg.target_frame_time(), None);

        cfg.target_frame_time_ms = Some(16.0);
        assert_eq!(cfg.target_frame_time(), Some(Duration::from_millis(16)));
    }

    #[test]
    fn default_materials_cover_gui_and_blocks() {
        let mats = default_materials();
        assert!(mats.iter().any(|m| m.name == "gui" && m.filter == "geometry_type::gui"));
        assert!(mats.iter().any(|m| m.filter == "geometry_type::block"));
    }
}
