use std::collections::HashMap;

use crate::error::ContractViolation;

/// Name of the always-present lightmap page.
pub const LIGHTMAP_NAME: &str = "lightmap";

/// A texture page as handed over by the caller, already copied out of caller memory.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureUpload {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub pixels: Vec<u8>,
}

/// UV rectangle of a sprite inside an atlas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl UvRect {
    /// The whole 0..1 UV space; used for textures that are not in an atlas.
    pub const FULL: UvRect = UvRect { min: [0.0, 0.0], max: [1.0, 1.0] };

    pub fn size(&self) -> [f32; 2] {
        [self.max[0] - self.min[0], self.max[1] - self.min[1]]
    }

    /// Maps a UV in 0..1 of the sprite into atlas space.
    pub fn remap(&self, uv: [f32; 2]) -> [f32; 2] {
        let size = self.size();
        [uv[0] * size[0] + self.min[0], uv[1] * size[1] + self.min[1]]
    }
}

/// One stored page.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasPage {
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub pixels: Vec<u8>,
    /// Changes every time the page is replaced.
    pub revision: u64,
}

/// Engine-side atlas table.
///
/// Pages and locations live in separate maps because the caller may send a
/// location before or after the page it belongs to.
#[derive(Debug)]
pub struct TextureManager {
    pages: HashMap<String, AtlasPage>,
    locations: HashMap<String, UvRect>,
    generation: u64,
    next_revision: u64,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        log::info!("creating the texture manager");
        let mut tm = Self {
            pages: HashMap::new(),
            locations: HashMap::new(),
            generation: 0,
            next_revision: 1,
        };
        tm.install_empty_lightmap();
        tm
    }

    /// Registers or replaces a named page.
    pub fn add_texture(&mut self, upload: TextureUpload) -> Result<(), ContractViolation> {
        let TextureUpload { name, width, height, components, pixels } = upload;

        if !(1..=4).contains(&components) {
            return Err(ContractViolation::ComponentCount {
                name,
                components: i32::from(components),
            });
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(usize::from(components)));
        if expected != Some(pixels.len()) {
            return Err(ContractViolation::TextureSizeMismatch {
                name,
                width,
                height,
                components,
                len: pixels.len(),
            });
        }

        log::info!("adding texture {name} ({width}x{height}, {components} components)");
        let revision = self.bump_revision();
        self.pages.insert(
            name,
            AtlasPage { width, height, components, pixels, revision },
        );
        Ok(())
    }

    /// Registers UV metadata for a sprite.
    pub fn add_texture_location(&mut self, name: String, rect: UvRect) -> Result<(), ContractViolation> {
        let axis = |min: f32, max: f32| (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max) && min <= max;
        if !axis(rect.min[0], rect.max[0]) || !axis(rect.min[1], rect.max[1]) {
            return Err(ContractViolation::MalformedLocation {
                name,
                min_u: rect.min[0],
                max_u: rect.max[0],
                min_v: rect.min[1],
                max_v: rect.max[1],
            });
        }

        log::trace!("texture location {name}: {rect:?}");
        self.locations.insert(name, rect);
        Ok(())
    }

    /// Replaces the lightmap.
    ///
    /// One word per pixel, packed `0xAARRGGBB` the way the client keeps its
    /// dynamic textures. Stored as RGBA bytes regardless of host endianness.
    pub fn send_lightmap(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), ContractViolation> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(ContractViolation::LightmapSizeMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }

        let bytes: Vec<u8> = pixels
            .iter()
            .flat_map(|p| {
                let [a, r, g, b] = p.to_be_bytes();
                [r, g, b, a]
            })
            .collect();
        let revision = self.bump_revision();
        self.pages.insert(
            LIGHTMAP_NAME.to_string(),
            AtlasPage { width, height, components: 4, pixels: bytes, revision },
        );
        Ok(())
    }

    /// Drops every page and location and starts a new generation.
    ///
    /// The lightmap slot is re-created empty.
    pub fn reset(&mut self) {
        log::info!(
            "resetting texture manager ({} pages, {} locations)",
            self.pages.len(),
            self.locations.len()
        );
        self.pages.clear();
        self.locations.clear();
        self.generation += 1;
        self.install_empty_lightmap();
    }

    pub fn texture(&self, name: &str) -> Option<&AtlasPage> {
        self.pages.get(name)
    }

    pub fn location(&self, name: &str) -> Option<UvRect> {
        self.locations.get(name).copied()
    }

    /// Location of a sprite, or the full UV space when none was registered.
    pub fn location_or_full(&self, name: &str) -> UvRect {
        self.location(name).unwrap_or_else(|| {
            log::debug!("no texture location for {name}, using the full texture");
            UvRect::FULL
        })
    }

    pub fn lightmap(&self) -> Option<&AtlasPage> {
        self.pages.get(LIGHTMAP_NAME)
    }

    pub fn pages(&self) -> impl Iterator<Item = (&str, &AtlasPage)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Incremented by every `reset`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn bump_revision(&mut self) -> u64 {
        let r = self.next_revision;
        self.next_revision += 1;
        r
    }

    fn install_empty_lightmap(&mut self) {
        let revision = self.bump_revision();
        self.pages.insert(
            LIGHTMAP_NAME.to_string(),
            AtlasPage { width: 0, height: 0, components: 4, pixels: Vec::new(), revision },
        );
    }
}
