use anyhow::{bail, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{self, ShaderProgram};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub pos: [f32; 3], // clip space
}

impl QuadVertex {
    pub const POSITION_LOCATION: u32 = 0;

    const ATTRS: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![Self::POSITION_LOCATION => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Corners of the full-screen quad: bottom-left, top-left, bottom-right, top-right.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-1.0, -1.0, 0.0] },
    QuadVertex { pos: [-1.0, 1.0, 0.0] },
    QuadVertex { pos: [1.0, -1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0, 0.0] },
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

/// Draws a static full-screen quad with the built-in shader pair.
///
/// The pipeline and buffers are created on first use and the pipeline is
/// rebuilt if the surface format changes. Culling is off: the two triangles
/// have opposite winding.
pub struct QuadRenderer {
    program: ShaderProgram,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl QuadRenderer {
    /// Compiles and links the quad shaders. Does not touch the GPU.
    pub fn new() -> Result<Self> {
        Self::with_program(shader::quad_program()?)
    }

    /// Uses a caller-supplied program; it must read positions from location 0 only.
    pub fn with_program(program: ShaderProgram) -> Result<Self> {
        let inputs = program.vertex().input_locations();
        if inputs != [QuadVertex::POSITION_LOCATION] {
            bail!(
                "failed to link shader program: `{}` reads {:?}, quad supplies only location {}",
                program.vertex().label(),
                inputs,
                QuadVertex::POSITION_LOCATION
            );
        }

        Ok(Self {
            program,
            pipeline_format: None,
            pipeline: None,
            vbo: None,
            ibo: None,
        })
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx);

        let (Some(pipeline), Some(vbo), Some(ibo)) =
            (self.pipeline.as_ref(), self.vbo.as_ref(), self.ibo.as_ref())
        else {
            return;
        };

        let mut rpass = target.load_pass("skink quad pass");

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let vs = self.program.vertex().create_module(ctx.device);
        let fs = self.program.fragment().create_module(ctx.device);

        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("skink quad pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("skink quad pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(self.program.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(self.program.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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

        log::debug!("quad pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skink quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("skink quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

impl Drop for QuadRenderer {
    fn drop(&mut self) {
        if self.pipeline.is_some() {
            log::debug!("releasing quad renderer resources");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::shader::{compile, ShaderSource, ShaderStage, QUAD_FRAGMENT};

    #[test]
    fn vertex_stride_is_three_floats() {
        let layout = QuadVertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[0].offset, 0);
    }

    #[test]
    fn quad_covers_clip_space() {
        for corner in [[-1.0f32, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]] {
            assert!(QUAD_VERTICES.iter().any(|v| v.pos[..2] == corner));
        }
        assert!(QUAD_VERTICES.iter().all(|v| v.pos[2] == 0.0));
    }

    #[test]
    fn indices_form_two_triangles_over_all_corners() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
        for v in 0..QUAD_VERTICES.len() as u32 {
            assert!(QUAD_INDICES.contains(&v));
        }
    }

    #[test]
    fn triangles_share_the_diagonal() {
        let (a, b) = QUAD_INDICES.split_at(3);
        let shared = a.iter().filter(|&&i| b.contains(&i)).count();
        assert_eq!(shared, 2);
    }

    #[test]
    fn buffer_bytes_match_gl_layout() {
        assert_eq!(bytemuck::cast_slice::<_, u8>(&QUAD_VERTICES).len(), 48);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&QUAD_INDICES).len(), 24);
    }

    #[test]
    fn built_in_program_is_accepted() {
        assert!(QuadRenderer::new().is_ok());
    }

    #[test]
    fn program_reading_extra_attributes_is_rejected() {
        let vs = compile(&ShaderSource {
            label: "two attrs",
            stage: ShaderStage::Vertex,
            wgsl: Cow::Borrowed(
                "@vertex fn vs_main(@location(0) p: vec3<f32>, @location(1) q: f32) -> @builtin(position) vec4<f32> { return vec4<f32>(p, q); }",
            ),
            entry_point: "vs_main",
        })
        .unwrap();
        let fs = compile(&QUAD_FRAGMENT).unwrap();
        let program = ShaderProgram::link(vs, fs).unwrap();
        assert!(QuadRenderer::with_program(program).is_err());
    }
}
