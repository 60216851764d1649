//! GPU rendering subsystem.
//!
//! The quad renderer owns its own GPU resources (pipeline, vertex buffer) and
//! records one render pass per frame: a clear followed by a single draw.

mod quad;

pub use quad::{
    FramePlan, QuadRenderer, QuadVertex, CLEAR_COLOR, DRAW_VERTEX_COUNT, QUAD_SHADER,
    QUAD_VERTICES, VERTEX_STRIDE,
};
