//! Shared GPU types and utilities used by all shape renderers.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Rect, Viewport};
use crate::paint::Paint;
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn from_viewport(viewport: Viewport) -> Self {
        Self {
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

/// Minimum binding size for the viewport uniform buffer.
pub(super) fn viewport_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
}

pub(super) fn viewport_ubo_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: viewport_ubo_min_binding_size(),
        },
        count: None,
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers shared by every instanced renderer.
#[derive(Default)]
pub(super) struct QuadBuffers {
    vbo: Option<wgpu::Buffer>,
    ibo: Option<wgpu::Buffer>,
}

impl QuadBuffers {
    pub(super) fn ensure(&mut self, ctx: &RenderCtx<'_>, label: &str) {
        if self.vbo.is_some() && self.ibo.is_some() {
            return;
        }
        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    /// Binds the quad at vertex slot 0 and the index buffer. Returns false before `ensure`.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let (Some(vbo), Some(ibo)) = (self.vbo.as_ref(), self.ibo.as_ref()) else {
            return false;
        };
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        true
    }
}

// ── instance staging ──────────────────────────────────────────────────────

/// CPU staging vector plus a growable GPU vertex buffer of instances.
///
/// Instances are collected for the whole frame and uploaded once, so every
/// batch drawn from the buffer refers to stable offsets.
pub(super) struct InstanceBuffer<T: Pod> {
    label: &'static str,
    staging: Vec<T>,
    vbo: Option<wgpu::Buffer>,
    capacity: usize,
}

impl<T: Pod> InstanceBuffer<T> {
    pub(super) fn new(label: &'static str) -> Self {
        Self { label, staging: Vec::new(), vbo: None, capacity: 0 }
    }

    #[inline]
    pub(super) fn clear(&mut self) {
        self.staging.clear();
    }

    #[inline]
    pub(super) fn push(&mut self, instance: T) {
        self.staging.push(instance);
    }

    #[inline]
    pub(super) fn len(&self) -> u32 {
        self.staging.len() as u32
    }

    #[cfg(test)]
    pub(super) fn staged(&self) -> &[T] {
        &self.staging
    }

    /// Grows the GPU buffer if needed and writes all staged instances.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        if self.staging.is_empty() {
            return;
        }
        if self.staging.len() > self.capacity || self.vbo.is_none() {
            let new_cap = self.staging.len().next_power_of_two().max(64);
            self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (new_cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
            log::debug!("{}: grew to {new_cap} instances", self.label);
        }
        if let Some(vbo) = self.vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.staging));
        }
    }

    /// Binds the instance buffer at vertex slot 1.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let Some(vbo) = self.vbo.as_ref() else { return false };
        rpass.set_vertex_buffer(1, vbo.slice(..));
        true
    }
}

// ── instanced quad pipeline ───────────────────────────────────────────────

/// Pipeline + viewport binding for SDF shapes drawn as instanced quads.
pub(super) struct QuadPipeline {
    label: &'static str,
    shader_src: &'static str,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: QuadBuffers,
}

impl QuadPipeline {
    pub(super) fn new(label: &'static str, shader_src: &'static str) -> Self {
        Self {
            label,
            shader_src,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: QuadBuffers::default(),
        }
    }

    /// Lazily builds the pipeline for the current surface format and its bindings.
    pub(super) fn ensure(
        &mut self,
        ctx: &RenderCtx<'_>,
        instance_layout: wgpu::VertexBufferLayout<'static>,
    ) {
        self.quad.ensure(ctx, self.label);

        if self.pipeline_format != Some(ctx.surface_format) || self.pipeline.is_none() {
            let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{} bgl", self.label)),
                entries: &[viewport_ubo_layout_entry()],
            });
            let pipeline = build_quad_pipeline(
                ctx,
                self.label,
                self.shader_src,
                &bgl,
                instance_layout,
            );
            self.pipeline_format = Some(ctx.surface_format);
            self.pipeline = Some(pipeline);
            self.bind_group_layout = Some(bgl);
            self.bind_group = None;
            self.viewport_ubo = None;
        }

        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} viewport ubo", self.label)),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} bind group", self.label)),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });
        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    pub(super) fn write_viewport(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_viewport(ctx.viewport)));
    }

    /// Sets pipeline, bind group and quad buffers. Returns false if not ready.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let (Some(pipeline), Some(bind_group)) = (self.pipeline.as_ref(), self.bind_group.as_ref())
        else {
            return false;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        self.quad.bind(rpass)
    }
}

/// Builds an alpha-blended triangle-list pipeline over `QuadVertex` + one instance buffer.
pub(super) fn build_quad_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    shader_src: &str,
    bgl: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} shader")),
        source: wgpu::ShaderSource::Wgsl(shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts: &[bgl],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
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
    })
}

/// Issues the indexed quad draw for an instance range.
#[inline]
pub(super) fn draw_instances(rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
    if !range.is_empty() {
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, range);
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor rect arguments.
///
/// Returns `None` for a zero-area clip (skip the draw). `clip = None` yields
/// the full viewport.
pub(crate) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let x  = ((r.origin.x * scale).max(0.0) as u32).min(phys_vw);
            let y  = ((r.origin.y * scale).max(0.0) as u32).min(phys_vh);
            let x2 = (((r.origin.x + r.size.x) * scale).max(0.0).ceil() as u32).min(phys_vw);
            let y2 = (((r.origin.y + r.size.y) * scale).max(0.0).ceil() as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

// ── paint resolution ──────────────────────────────────────────────────────

/// Paint fields shared by the SDF shape instances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(super) struct ResolvedPaint {
    pub color0: [f32; 4],
    pub color1: [f32; 4],
    pub grad_p0: [f32; 2],
    pub grad_p1: [f32; 2],
    /// `[t0, t1, spread_code, 0]`.
    pub grad_params: [f32; 4],
}

/// Flattens a `Paint` for the shaders.
///
/// Solid fills produce identical colors and a degenerate gradient axis, so the
/// shader falls back to `color0`. Gradients keep their first and last stop.
pub(super) fn resolve_paint(paint: &Paint, warned_multi_stop: &mut bool) -> ResolvedPaint {
    match paint {
        Paint::Solid(c) => {
            let col = c.to_array();
            ResolvedPaint {
                color0: col,
                color1: col,
                grad_p0: [0.0, 0.0],
                grad_p1: [0.0, 0.0],
                grad_params: [0.0, 1.0, 0.0, 0.0],
            }
        }
        Paint::LinearGradient(g) => {
            let (Some(first), Some(last)) = (g.stops.first(), g.stops.last()) else {
                return resolve_paint(&Paint::none(), warned_multi_stop);
            };
            if g.stops.len() > 2 && !*warned_multi_stop {
                log::debug!("only 2-stop gradients supported; using first and last stop");
                *warned_multi_stop = true;
            }
            ResolvedPaint {
                color0: first.color.to_array(),
                color1: last.color.to_array(),
                grad_p0: [g.start.x, g.start.y],
                grad_p1: [g.end.x, g.end.y],
                grad_params: [first.t, last.t, g.spread.shader_code(), 0.0],
            }
        }
    }
}
