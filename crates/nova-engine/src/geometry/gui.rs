use nova_wire::GUI_VERTEX_STRIDE;

use crate::error::ContractViolation;
use crate::textures::{TextureManager, UvRect};
use super::check_indices;

/// GUI geometry copied out of a caller buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct GuiUpload {
    pub texture_name: String,
    pub atlas_name: String,
    pub vertices: Vec<f32>,
    pub indices: Vec<i32>,
}

/// One GUI draw with UVs already in atlas space.
#[derive(Debug, Clone, PartialEq)]
pub struct GuiDraw {
    /// Normalized sprite name (`minecraft:...`).
    pub texture: String,
    pub atlas: String,
    pub vertices: Vec<f32>,
    pub indices: Vec<i32>,
}

/// `textures/gui/widgets.png` becomes `minecraft:gui/widgets`.
pub fn normalize_gui_texture_name(name: &str) -> String {
    let name = name.strip_prefix("textures/").unwrap_or(name);
    let name = name.strip_suffix(".png").unwrap_or(name);
    format!("minecraft:{name}")
}

/// The GUI draw list. Append-only until the caller clears it.
#[derive(Debug, Default)]
pub struct GuiBuffers {
    draws: Vec<GuiDraw>,
}

impl GuiBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, upload: GuiUpload, textures: &TextureManager) -> Result<(), ContractViolation> {
        let GuiUpload { texture_name, atlas_name, mut vertices, indices } = upload;

        if vertices.len() % GUI_VERTEX_STRIDE != 0 {
            return Err(ContractViolation::VertexStride {
                what: format!("gui buffer `{texture_name}`"),
                len: vertices.len(),
                stride: GUI_VERTEX_STRIDE,
            });
        }
        let vertex_count = vertices.len() / GUI_VERTEX_STRIDE;
        check_indices(|| format!("gui buffer `{texture_name}`"), &indices, vertex_count)?;

        let texture = normalize_gui_texture_name(&texture_name);
        let rect = textures.location_or_full(&texture);
        remap_uvs(&mut vertices, rect);

        log::trace!("gui draw {texture} from {atlas_name}: {vertex_count} vertices");
        self.draws.push(GuiDraw { texture, atlas: atlas_name, vertices, indices });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn draws(&self) -> &[GuiDraw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

fn remap_uvs(vertices: &mut [f32], rect: UvRect) {
    for v in vertices.chunks_exact_mut(GUI_VERTEX_STRIDE) {
        let [u, w] = rect.remap([v[3], v[4]]);
        v[3] = u;
        v[4] = w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(u: f32, v: f32) -> [f32; 9] {
        [1.0, 2.0, 0.0, u, v, 1.0, 1.0, 1.0, 1.0]
    }

    fn upload(name: &str, verts: &[[f32; 9]]) -> GuiUpload {
        GuiUpload {
            texture_name: name.to_string(),
            atlas_name: "gui".to_string(),
            vertices: verts.iter().flatten().copied().collect(),
            indices: vec![0, 1, 0],
        }
    }

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn names_are_normalized() {
        assert_eq!(normalize_gui_texture_name("textures/gui/widgets.png"), "minecraft:gui/widgets");
        assert_eq!(normalize_gui_texture_name("font/ascii"), "minecraft:font/ascii");
        assert_eq!(normalize_gui_texture_name("gui/textures/x.png.png"), "minecraft:gui/textures/x.png");
    }

    // ── remap ─────────────────────────────────────────────────────────────

    #[test]
    fn uvs_are_remapped_into_the_location() {
        let mut tm = TextureManager::new();
        tm.add_texture_location(
            "minecraft:gui/widgets".into(),
            UvRect { min: [0.5, 0.0], max: [1.0, 0.25] },
        )
        .unwrap();

        let mut gui = GuiBuffers::new();
        gui.add(upload("textures/gui/widgets.png", &[vertex(0.0, 0.0), vertex(1.0, 1.0)]), &tm)
            .unwrap();

        let draw = &gui.draws()[0];
        assert_eq!(draw.texture, "minecraft:gui/widgets");
        assert_eq!(&draw.vertices[3..5], &[0.5, 0.0]);
        assert_eq!(&draw.vertices[12..14], &[1.0, 0.25]);
        // position and colour are untouched
        assert_eq!(&draw.vertices[0..3], &[1.0, 2.0, 0.0]);
        assert_eq!(&draw.vertices[14..18], &[1.0; 4]);
    }

    #[test]
    fn unregistered_name_keeps_uvs() {
        let tm = TextureManager::new();
        let mut gui = GuiBuffers::new();
        gui.add(upload("gui/icons", &[vertex(0.25, 0.75), vertex(1.0, 0.0)]), &tm).unwrap();
        assert_eq!(&gui.draws()[0].vertices[3..5], &[0.25, 0.75]);
    }

    // ── list ──────────────────────────────────────────────────────────────

    #[test]
    fn draws_accumulate_until_cleared() {
        let tm = TextureManager::new();
        let mut gui = GuiBuffers::new();
        for _ in 0..3 {
            gui.add(upload("a", &[vertex(0.0, 0.0), vertex(0.0, 0.0)]), &tm).unwrap();
        }
        assert_eq!(gui.len(), 3);
        gui.clear();
        assert!(gui.is_empty());
    }

    #[test]
    fn bad_stride_is_rejected() {
        let tm = TextureManager::new();
        let mut gui = GuiBuffers::new();
        let mut up = upload("a", &[vertex(0.0, 0.0), vertex(0.0, 0.0)]);
        up.vertices.truncate(10);
        let err = gui.add(up, &tm).unwrap_err();
        assert!(matches!(err, ContractViolation::VertexStride { len: 10, stride: 9, .. }));
        assert!(gui.is_empty());
    }
}
