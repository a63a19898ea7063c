use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::TextCmd;
use crate::text::FontSystem;

use super::common::{
    build_quad_pipeline, draw_instances, viewport_ubo_layout_entry, InstanceBuffer, QuadBuffers,
    ViewportUniform,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── atlas packing ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Rasterized glyph waiting to be copied into the atlas texture.
struct PendingUpload {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    bitmap: Vec<u8>,
}

/// Shelf packer for the glyph atlas. Pure CPU bookkeeping.
#[derive(Debug)]
struct ShelfPacker {
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self { cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }
}

impl ShelfPacker {
    /// Reserves a `w × h` cell. Returns its top-left corner, or `None` once the atlas is full.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!(
                "TextRenderer: glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); \
                 some glyphs will not be rendered"
            );
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Maintains a 2048 × 2048 R8Unorm glyph atlas. Glyphs are rasterized via
/// fontdue at physical pixel size on first use and cached for the renderer's
/// lifetime, keyed by `GlyphRasterConfig` (font, glyph index, pixel size).
///
/// Each glyph instance carries the command's pivot and rotation; the vertex
/// shader rotates the glyph quad about the pivot.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    packer: ShelfPacker,
    pending: Vec<PendingUpload>,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: QuadBuffers,
    instances: InstanceBuffer<GlyphInstance>,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            packer: ShelfPacker::default(),
            pending: Vec::new(),
            glyph_cache: HashMap::new(),
            quad: QuadBuffers::default(),
            instances: InstanceBuffer::new("dialclock text instance vbo"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn begin_frame(&mut self) {
        self.instances.clear();
    }

    /// Lays out one text command and stages its glyphs.
    ///
    /// `scale_factor` selects the raster size so glyphs stay crisp on HiDPI
    /// surfaces; positions are converted back to logical pixels.
    pub fn push(&mut self, cmd: &TextCmd, fonts: &FontSystem, scale_factor: f32) -> Range<u32> {
        let start = self.instances.len();

        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
            return start..start;
        };
        if cmd.text.is_empty() || cmd.size <= 0.0 {
            return start..start;
        }

        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let color = cmd.color.to_array();
        let pivot = [cmd.pivot.x, cmd.pivot.y];
        let rad = cmd.rotation.to_radians();
        let rot = [rad.cos(), rad.sin()];

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x * scale,
            y: cmd.origin.y * scale,
            max_width: cmd.max_width.map(|w| w * scale),
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        // Snapshot glyph positions so the borrow on `self.layout` ends before
        // the cache and packer are mutated.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        for (key, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }
                let (gw, gh) = (metrics.width as u32, metrics.height as u32);
                let Some((gx, gy)) = self.packer.allocate(gw, gh) else { continue };

                let atlas_f = ATLAS_SIZE as f32;
                self.glyph_cache.insert(key, CachedGlyph {
                    uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
                    uv_max: [(gx + gw) as f32 / atlas_f, (gy + gh) as f32 / atlas_f],
                });
                self.pending.push(PendingUpload { x: gx, y: gy, w: gw, h: gh, bitmap });
            }

            let Some(cached) = self.glyph_cache.get(&key) else { continue };

            self.instances.push(GlyphInstance {
                dst_min: [x / scale, y / scale],
                dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
                pivot,
                rot,
            });
        }

        start..self.instances.len()
    }

    /// Creates GPU resources, flushes newly rasterized glyphs into the atlas,
    /// and uploads this frame's instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.len() == 0 && self.pending.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_atlas(ctx);
        self.ensure_sampler(ctx);
        self.ensure_bindings(ctx);
        self.quad.ensure(ctx, "dialclock text");

        self.flush_pending(ctx);

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(
                ubo,
                0,
                bytemuck::bytes_of(&ViewportUniform::from_viewport(ctx.viewport)),
            );
        }
        self.instances.upload(ctx);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let (Some(pipeline), Some(bind_group)) = (self.pipeline.as_ref(), self.bind_group.as_ref())
        else {
            return;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        if !self.quad.bind(rpass) || !self.instances.bind(rpass) {
            return;
        }
        draw_instances(rpass, range);
    }

    // ── atlas helpers ──────────────────────────────────────────────────────

    fn flush_pending(&mut self, ctx: &RenderCtx<'_>) {
        let Some(atlas) = self.atlas_texture.as_ref() else { return };

        for up in self.pending.drain(..) {
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: atlas,
                    mip_level: 0,
                    origin: wgpu::Origin3d { x: up.x, y: up.y, z: 0 },
                    aspect: wgpu::TextureAspect::All,
                },
                &up.bitmap,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(up.w),
                    rows_per_image: Some(up.h),
                },
                wgpu::Extent3d { width: up.w, height: up.h, depth_or_array_layers: 1 },
            );
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("dialclock text bgl"),
            entries: &[
                viewport_ubo_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = build_quad_pipeline(
            ctx,
            "dialclock text",
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("dialclock text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("dialclock text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas_view) = self.atlas_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dialclock text viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dialclock text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (64 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
///  offset 48  pivot    [f32; 2]   loc 6
///  offset 56  rot      [f32; 2]   loc 7  (cos, sin)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
    pivot: [f32; 2],
    rot: [f32; 2],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4, // color
        6 => Float32x2, // pivot
        7 => Float32x2  // rot
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Degrees, Vec2};
    use crate::paint::Color;
    use crate::text::FontId;

    #[test]
    fn packer_moves_to_next_shelf() {
        let mut p = ShelfPacker::default();
        let a = p.allocate(ATLAS_SIZE - 4, 10);
        let b = p.allocate(8, 6);
        assert_eq!(a, Some((GLYPH_PADDING, GLYPH_PADDING)));
        assert_eq!(b, Some((GLYPH_PADDING, GLYPH_PADDING + 10 + GLYPH_PADDING)));
    }

    #[test]
    fn packer_reports_full_atlas() {
        let mut p = ShelfPacker::default();
        assert!(p.allocate(10, ATLAS_SIZE).is_none());
        assert!(p.allocate(1, 1).is_none());
    }

    #[test]
    fn unknown_font_stages_nothing() {
        let mut r = TextRenderer::new();
        let fonts = FontSystem::new();
        let cmd = TextCmd {
            text: "7".to_string(),
            font: FontId(3),
            size: 16.0,
            color: Color::black(),
            origin: Vec2::zero(),
            max_width: None,
            rotation: Degrees(0.0),
            pivot: Vec2::zero(),
        };
        assert!(r.push(&cmd, &fonts, 1.0).is_empty());
    }
}
