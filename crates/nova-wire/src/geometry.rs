use std::os::raw::c_char;

use bytemuck::Zeroable;

/// Vertex layout tag carried in `ChunkRenderObject::format`.
///
/// The wire value is the declaration index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum VertexFormat {
    Pos = 0,
    PosUv = 1,
    PosUvLightmapUvNormalTangent = 2,
    PosUvColor = 3,
}

impl VertexFormat {
    pub const ALL: [VertexFormat; 4] = [
        VertexFormat::Pos,
        VertexFormat::PosUv,
        VertexFormat::PosUvLightmapUvNormalTangent,
        VertexFormat::PosUvColor,
    ];

    pub fn from_tag(tag: i32) -> Option<Self> {
        usize::try_from(tag).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// 32-bit words per vertex as sent by the caller.
    pub const fn wire_stride(self) -> usize {
        match self {
            VertexFormat::Pos => 3,
            VertexFormat::PosUv => 5,
            // position, uv, packed lightmap uv, packed color
            VertexFormat::PosUvLightmapUvNormalTangent => 7,
            // position, uv, rgba
            VertexFormat::PosUvColor => 9,
        }
    }

    /// 32-bit words per vertex once stored by the engine.
    ///
    /// Normals and tangents are not computed by the caller; the engine pads
    /// three zero words for each.
    pub const fn stored_stride(self) -> usize {
        match self {
            VertexFormat::PosUvLightmapUvNormalTangent => 13,
            other => other.wire_stride(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            VertexFormat::Pos => "POS",
            VertexFormat::PosUv => "POS_UV",
            VertexFormat::PosUvLightmapUvNormalTangent => "POS_UV_LIGHTMAPUV_NORMAL_TANGENT",
            VertexFormat::PosUvColor => "POS_UV_COLOR",
        }
    }
}

/// Geometry categories used to build filter expressions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum GeometryType {
    Block,
    Entity,
    FallingBlock,
    Gui,
    Cloud,
    SkyDecoration,
    SelectionBox,
    Glint,
    Weather,
    Hand,
    FullscreenQuad,
    Particle,
    LitParticle,
    Eyes,
}

impl GeometryType {
    pub const fn name(self) -> &'static str {
        match self {
            GeometryType::Block => "block",
            GeometryType::Entity => "entity",
            GeometryType::FallingBlock => "falling_block",
            GeometryType::Gui => "gui",
            GeometryType::Cloud => "cloud",
            GeometryType::SkyDecoration => "sky_decoration",
            GeometryType::SelectionBox => "selection_box",
            GeometryType::Glint => "glint",
            GeometryType::Weather => "weather",
            GeometryType::Hand => "hand",
            GeometryType::FullscreenQuad => "fullscreen_quad",
            GeometryType::Particle => "particle",
            GeometryType::LitParticle => "lit_particle",
            GeometryType::Eyes => "eyes",
        }
    }
}

/// `mc_chunk_render_object`: geometry for one chunk section under one filter.
///
/// `vertex_data` and `indices` are arrays of 32-bit ints of
/// `vertex_buffer_size` and `index_buffer_size` elements.
#[repr(C)]
#[derive(Debug, Copy, Clone, Zeroable)]
pub struct ChunkRenderObject {
    pub format: i32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub id: i32,
    pub vertex_data: *const i32,
    pub indices: *const i32,
    pub vertex_buffer_size: i32,
    pub index_buffer_size: i32,
}

/// Floats per GUI vertex: position (3), uv (2), rgba (4).
pub const GUI_VERTEX_STRIDE: usize = 9;

/// `mc_gui_buffer`: one draw call of 2D UI geometry.
#[repr(C)]
#[derive(Debug, Copy, Clone, Zeroable)]
pub struct GuiBuffer {
    pub texture_name: *const c_char,
    pub index_buffer_size: i32,
    pub vertex_buffer_size: i32,
    pub index_buffer: *const i32,
    pub vertex_buffer: *const f32,
    pub atlas_name: *const c_char,
}
