use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::device::BuildError;

/// Fixed shader source for the quad pipeline.
///
/// Kept as a named constant so tests can substitute a different source via
/// [`QuadRenderer::with_shader`] without touching control flow.
pub const QUAD_SHADER: &str = include_str!("shaders/quad.wgsl");

/// Clear color applied at the start of every frame: opaque black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// One packed vertex: clip-space position plus texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 2],
    pub tex_coord: [f32; 2],
}

/// Full-screen quad as two triangles, positions already in clip space,
/// texture coordinates mapping `(0,0)` to the first corner.
pub const QUAD_VERTICES: [QuadVertex; 6] = [
    QuadVertex { pos: [-1.0, -1.0], tex_coord: [0.0, 0.0] },
    QuadVertex { pos: [ 1.0, -1.0], tex_coord: [1.0, 0.0] },
    QuadVertex { pos: [ 1.0,  1.0], tex_coord: [1.0, 1.0] },
    QuadVertex { pos: [ 1.0,  1.0], tex_coord: [1.0, 1.0] },
    QuadVertex { pos: [-1.0,  1.0], tex_coord: [0.0, 1.0] },
    QuadVertex { pos: [-1.0, -1.0], tex_coord: [0.0, 0.0] },
];

/// Vertex stride declared to the pipeline.
///
/// This is twice the packed size of [`QuadVertex`]: each step the pipeline
/// takes lands on every second packed entry, and only three steps fit inside
/// the 96-byte upload.
pub const VERTEX_STRIDE: wgpu::BufferAddress = 32;

/// Vertices consumed by the draw call.
///
/// Together with [`VERTEX_STRIDE`] this renders a single triangle out of the
/// six-vertex upload (packed entries 0, 2 and 4).
// TODO: decide whether this should become stride 16 / count 6 and cover the
// whole quad; current output is deliberately kept as the single triangle.
pub const DRAW_VERTEX_COUNT: u32 = 3;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

/// Recording plan for one frame: a single clear followed by a single draw.
///
/// The plan is a fixed value; exposing it keeps the clear-then-draw shape
/// inspectable without recording against a device.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub clear_color: wgpu::Color,
    pub vertices: std::ops::Range<u32>,
    pub instances: std::ops::Range<u32>,
}

impl FramePlan {
    pub fn fixed() -> Self {
        Self {
            clear_color: CLEAR_COLOR,
            vertices: 0..DRAW_VERTEX_COUNT,
            instances: 0..1,
        }
    }
}

/// Renderer for the fixed quad geometry.
///
/// All resources are created up front and immutable afterwards; recording the
/// same frame any number of times reuses them untouched.
#[derive(Debug)]
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
}

impl QuadRenderer {
    /// Builds the shader, vertex buffer and pipeline against `surface_format`.
    pub async fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, BuildError> {
        Self::with_shader(device, surface_format, QUAD_SHADER).await
    }

    /// Like [`new`](Self::new) with an explicit shader source.
    ///
    /// Validation failures are captured through wgpu error scopes, so a bad
    /// source surfaces as [`BuildError::ShaderCompileFailed`] instead of
    /// reaching the global uncaptured-error handler.
    pub async fn with_shader(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        source: &str,
    ) -> Result<Self, BuildError> {
        let shader_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quadpass quad shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        if let Some(err) = shader_scope.pop().await {
            return Err(BuildError::ShaderCompileFailed(err));
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadpass quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let pipeline_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quadpass quad pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quadpass quad pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });
        if let Some(err) = pipeline_scope.pop().await {
            return Err(BuildError::PipelineCreationFailed(err));
        }

        log::debug!(
            "quad resources ready: {} vertices uploaded, {} drawn per frame",
            QUAD_VERTICES.len(),
            DRAW_VERTEX_COUNT
        );

        Ok(Self {
            pipeline,
            vertex_buffer,
        })
    }

    /// Records the frame into `encoder`: clear `view` to [`CLEAR_COLOR`], then
    /// draw [`DRAW_VERTEX_COUNT`] vertices in one pass.
    pub fn record(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let FramePlan {
            clear_color,
            vertices,
            instances,
        } = FramePlan::fixed();

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadpass quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(vertices, instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── vertex data ───────────────────────────────────────────────────────

    #[test]
    fn quad_uploads_six_packed_vertices() {
        assert_eq!(QUAD_VERTICES.len(), 6);

        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 96);
    }

    #[test]
    fn quad_corners_and_tex_coords_match() {
        let positions: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.pos).collect();
        let tex_coords: Vec<[f32; 2]> = QUAD_VERTICES.iter().map(|v| v.tex_coord).collect();

        assert_eq!(
            positions,
            vec![
                [-1.0, -1.0],
                [1.0, -1.0],
                [1.0, 1.0],
                [1.0, 1.0],
                [-1.0, 1.0],
                [-1.0, -1.0]
            ]
        );
        assert_eq!(
            tex_coords,
            vec![
                [0.0, 0.0],
                [1.0, 0.0],
                [1.0, 1.0],
                [1.0, 1.0],
                [0.0, 1.0],
                [0.0, 0.0]
            ]
        );
    }

    // ── pipeline vertex layout ────────────────────────────────────────────

    #[test]
    fn vertex_layout_declares_32_byte_stride_and_two_float2_attributes() {
        let layout = vertex_buffer_layout();

        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 2);

        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);

        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn stride_reaches_exactly_the_drawn_vertex_count() {
        let buffer_len = std::mem::size_of_val(&QUAD_VERTICES) as wgpu::BufferAddress;
        assert_eq!(buffer_len / VERTEX_STRIDE, u64::from(DRAW_VERTEX_COUNT));
    }

    // ── frame plan ────────────────────────────────────────────────────────

    #[test]
    fn frame_plan_is_one_black_clear_and_one_three_vertex_draw() {
        let plan = FramePlan::fixed();

        assert_eq!(
            plan.clear_color,
            wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
        );
        assert_eq!(plan.vertices, 0..3);
        assert_eq!(plan.instances, 0..1);
    }

    // ── shader source ─────────────────────────────────────────────────────

    #[test]
    fn embedded_shader_names_both_entry_points() {
        assert!(QUAD_SHADER.contains("fn vs_main"));
        assert!(QUAD_SHADER.contains("fn fs_main"));
    }
}
