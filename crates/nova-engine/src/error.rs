use thiserror::Error;

/// A programmer error at the bridge boundary.
///
/// These are never recoverable: a caller that sends a malformed buffer has
/// already broken the layout contract. The bridge logs the violation and
/// aborts the process.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("`{call}` called before initialize()")]
    NotInitialized { call: &'static str },

    #[error("initialize() called while the engine is already running")]
    AlreadyInitialized,

    #[error("{what}: null pointer with non-zero length")]
    NullPointer { what: &'static str },

    #[error("{what}: string is not valid UTF-8")]
    InvalidUtf8 { what: &'static str },

    #[error("{what}: negative size {size}")]
    NegativeSize { what: &'static str, size: i64 },

    #[error("texture `{name}`: {len} bytes, expected {width}x{height}x{components}")]
    TextureSizeMismatch {
        name: String,
        width: u32,
        height: u32,
        components: u8,
        len: usize,
    },

    #[error("texture `{name}`: {width}x{height}x{components} bytes overflows the address space")]
    TextureTooLarge {
        name: String,
        width: usize,
        height: usize,
        components: u8,
    },

    #[error("texture `{name}`: {components} components, expected 1..=4")]
    ComponentCount { name: String, components: i32 },

    #[error("texture location `{name}`: rectangle u [{min_u}, {max_u}] v [{min_v}, {max_v}] outside 0 <= min <= max <= 1")]
    MalformedLocation {
        name: String,
        min_u: f32,
        max_u: f32,
        min_v: f32,
        max_v: f32,
    },

    #[error("lightmap: {len} pixels, expected {width}x{height}")]
    LightmapSizeMismatch { len: usize, width: u32, height: u32 },

    #[error("chunk {id} in `{filter}`: unknown vertex format tag {tag}")]
    UnknownVertexFormat { filter: String, id: i32, tag: i32 },

    #[error("{what}: {len} words is not a multiple of the vertex stride {stride}")]
    VertexStride {
        what: String,
        len: usize,
        stride: usize,
    },

    #[error("{what}: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        what: String,
        index: i64,
        vertex_count: usize,
    },
}
