//! Render options.
//!
//! A single key/value table fed by three calls: `push_settings` writes every
//! field of the snapshot, `set_string_setting` and `set_float_setting` write
//! one key each. Later writes replace earlier ones regardless of which call
//! made them.

use std::collections::BTreeMap;

use nova_wire::Settings;

/// String option naming the active shaderpack.
pub const LOADED_SHADERPACK: &str = "loadedShaderpack";

pub const RENDER_MENU: &str = "renderMenu";
pub const ANAGLYPH: &str = "anaglyph";
pub const FOG_COLOR_RED: &str = "fogColorRed";
pub const FOG_COLOR_GREEN: &str = "fogColorGreen";
pub const FOG_COLOR_BLUE: &str = "fogColorBlue";
pub const DISPLAY_WIDTH: &str = "displayWidth";
pub const DISPLAY_HEIGHT: &str = "displayHeight";
pub const VIEW_BOBBING: &str = "viewBobbing";
pub const CLOUDS: &str = "shouldRenderClouds";
pub const RENDER_DISTANCE: &str = "renderDistance";
pub const HAS_BLINDNESS: &str = "hasBlindness";

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

impl OptionValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            OptionValue::Float(v) => Some(v),
            OptionValue::Int(v) => Some(f64::from(v)),
            OptionValue::Bool(v) => Some(if v { 1.0 } else { 0.0 }),
            OptionValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    values: BTreeMap<String, OptionValue>,
}

impl RenderOptions {
    /// Starts from the default snapshot plus the configured shaderpack.
    pub fn new(loaded_shaderpack: &str) -> Self {
        let mut opts = Self { values: BTreeMap::new() };
        opts.apply_snapshot(&Settings::default());
        opts.set_string(LOADED_SHADERPACK, loaded_shaderpack);
        opts
    }

    /// Writes every field of `snapshot`.
    pub fn apply_snapshot(&mut self, s: &Settings) {
        use OptionValue::*;

        let fields = [
            (RENDER_MENU, Bool(s.render_menu != 0)),
            (ANAGLYPH, Bool(s.anaglyph != 0)),
            (FOG_COLOR_RED, Float(s.fog_color_red)),
            (FOG_COLOR_GREEN, Float(s.fog_color_green)),
            (FOG_COLOR_BLUE, Float(s.fog_color_blue)),
            (DISPLAY_WIDTH, Int(s.display_width)),
            (DISPLAY_HEIGHT, Int(s.display_height)),
            (VIEW_BOBBING, Bool(s.view_bobbing != 0)),
            (CLOUDS, Int(s.should_render_clouds)),
            (RENDER_DISTANCE, Int(s.render_distance)),
            (HAS_BLINDNESS, Bool(s.has_blindness != 0)),
        ];
        for (key, value) in fields {
            self.values.insert(key.to_string(), value);
        }
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        if key == LOADED_SHADERPACK {
            log::info!("shaderpack set to `{value}`");
        } else {
            log::debug!("string setting {key} = {value:?}");
        }
        self.values.insert(key.to_string(), OptionValue::Str(value.to_string()));
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        log::debug!("float setting {key} = {value}");
        self.values.insert(key.to_string(), OptionValue::Float(f64::from(value)));
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(OptionValue::as_f64)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(OptionValue::as_str)
    }

    pub fn loaded_shaderpack(&self) -> &str {
        self.string(LOADED_SHADERPACK).unwrap_or("default")
    }

    /// Fog colour as RGB in 0..1, clamped.
    pub fn fog_color(&self) -> [f64; 3] {
        [FOG_COLOR_RED, FOG_COLOR_GREEN, FOG_COLOR_BLUE]
            .map(|k| self.float(k).unwrap_or(0.0).clamp(0.0, 1.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
