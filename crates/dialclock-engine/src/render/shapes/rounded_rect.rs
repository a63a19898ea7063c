use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::RoundedRectCmd;

use super::common::{draw_instances, resolve_paint, InstanceBuffer, QuadPipeline};

/// Renderer for `DrawCmd::RoundedRect`.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::LinearGradient` (2-stop with explicit stop positions and spread)
///
/// Borders are rendered as an AA ring on the inner edge of the shape, so an
/// outline-only command (`Paint::none()` + border) strokes the exact footprint.
pub struct RoundedRectRenderer {
    pipeline: QuadPipeline,
    instances: InstanceBuffer<RoundedRectInstance>,
    warned_multi_stop: bool,
}

impl Default for RoundedRectRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundedRectRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: QuadPipeline::new(
                "dialclock rounded_rect",
                include_str!("shaders/rounded_rect.wgsl"),
            ),
            instances: InstanceBuffer::new("dialclock rounded_rect instance vbo"),
            warned_multi_stop: false,
        }
    }

    pub fn begin_frame(&mut self) {
        self.instances.clear();
    }

    /// Stages one rounded rectangle. Returns the instance range to draw.
    pub fn push(&mut self, cmd: &RoundedRectCmd) -> Range<u32> {
        let start = self.instances.len();

        let r = cmd.rect.normalized();
        if r.is_empty() {
            return start..start;
        }

        let paint = resolve_paint(&cmd.paint, &mut self.warned_multi_stop);
        let (border_width, border_color) = match &cmd.border {
            Some(b) => (b.width.max(0.0), b.color.to_array()),
            None => (0.0, [0.0; 4]),
        };

        self.instances.push(RoundedRectInstance {
            origin: [r.origin.x, r.origin.y],
            size: [r.size.x, r.size.y],
            radii: cmd.radii.fitted(r.size.x, r.size.y).to_array(),
            color0: paint.color0,
            color1: paint.color1,
            grad_p0: paint.grad_p0,
            grad_p1: paint.grad_p1,
            grad_params: paint.grad_params,
            border_color,
            border_width_pad: [border_width, 0.0],
        });
        start..start + 1
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.len() == 0 {
            return;
        }
        self.pipeline.ensure(ctx, RoundedRectInstance::layout());
        self.pipeline.write_viewport(ctx);
        self.instances.upload(ctx);
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        if range.is_empty() || !self.pipeline.bind(rpass) || !self.instances.bind(rpass) {
            return;
        }
        draw_instances(rpass, range);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (120 bytes):
///
///  offset   0  origin           [f32; 2]   loc 1
///  offset   8  size             [f32; 2]   loc 2
///  offset  16  radii            [f32; 4]   loc 3  (tl, tr, br, bl)
///  offset  32  color0           [f32; 4]   loc 4
///  offset  48  color1           [f32; 4]   loc 5
///  offset  64  grad_p0          [f32; 2]   loc 6
///  offset  72  grad_p1          [f32; 2]   loc 7
///  offset  80  grad_params      [f32; 4]   loc 8  (t0, t1, spread, _)
///  offset  96  border_color     [f32; 4]   loc 9
///  offset 112  border_width_pad [f32; 2]   loc 10 (.x = border_width)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    radii: [f32; 4],
    color0: [f32; 4],
    color1: [f32; 4],
    grad_p0: [f32; 2],
    grad_p1: [f32; 2],
    grad_params: [f32; 4],
    border_color: [f32; 4],
    border_width_pad: [f32; 2],
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
        1 => Float32x2,  // origin
        2 => Float32x2,  // size
        3 => Float32x4,  // radii
        4 => Float32x4,  // color0
        5 => Float32x4,  // color1
        6 => Float32x2,  // grad_p0
        7 => Float32x2,  // grad_p1
        8 => Float32x4,  // grad_params
        9 => Float32x4,  // border_color
        10 => Float32x2  // border_width_pad
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect};
    use crate::paint::{Color, Paint};
    use crate::scene::Border;

    #[test]
    fn empty_rects_are_culled() {
        let mut r = RoundedRectRenderer::new();
        let cmd = RoundedRectCmd::new(Rect::new(5.0, 5.0, 0.0, 10.0), CornerRadii::all(2.0), Paint::none(), None);
        assert!(r.push(&cmd).is_empty());
    }

    #[test]
    fn negative_extent_is_normalized() {
        let mut r = RoundedRectRenderer::new();
        let cmd = RoundedRectCmd::new(
            Rect::new(20.0, 20.0, -10.0, -4.0),
            CornerRadii::all(14.0),
            Paint::none(),
            Some(Border::new(2.0, Color::red())),
        );
        assert_eq!(r.push(&cmd), 0..1);
        let inst = r.instances.staged()[0];
        assert_eq!(inst.origin, [10.0, 16.0]);
        assert_eq!(inst.size, [10.0, 4.0]);
        assert_eq!(inst.radii, [2.0; 4]);
        assert_eq!(inst.border_width_pad[0], 2.0);
    }
}
