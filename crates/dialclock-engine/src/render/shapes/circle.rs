use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::CircleCmd;

use super::common::{draw_instances, resolve_paint, InstanceBuffer, QuadPipeline};

/// Renderer for `DrawCmd::Circle`.
///
/// Supported paints:
/// - `Paint::Solid`
/// - `Paint::LinearGradient` (2-stop with explicit stop positions and spread)
///
/// Borders are rendered as an AA ring on the inner edge of the circle. A cutout
/// removes a rounded-rectangle footprint from both fill and border.
pub struct CircleRenderer {
    pipeline: QuadPipeline,
    instances: InstanceBuffer<CircleInstance>,
    warned_multi_stop: bool,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self {
            pipeline: QuadPipeline::new("dialclock circle", include_str!("shaders/circle.wgsl")),
            instances: InstanceBuffer::new("dialclock circle instance vbo"),
            warned_multi_stop: false,
        }
    }

    /// Drops instances staged for the previous frame.
    pub fn begin_frame(&mut self) {
        self.instances.clear();
    }

    /// Stages one circle. Returns the instance range to draw (empty when culled).
    pub fn push(&mut self, cmd: &CircleCmd) -> Range<u32> {
        let start = self.instances.len();
        if cmd.radius <= 0.0 || !cmd.center.is_finite() {
            return start..start;
        }

        let paint = resolve_paint(&cmd.paint, &mut self.warned_multi_stop);

        let (border_width, border_color) = match &cmd.border {
            Some(b) => (b.width.max(0.0), b.color.to_array()),
            None => (0.0, [0.0; 4]),
        };

        let (cutout_rect, cutout_radii) = match &cmd.cutout {
            Some(c) => {
                let r = c.rect.normalized();
                (
                    [r.origin.x, r.origin.y, r.size.x, r.size.y],
                    c.radii.fitted(r.size.x, r.size.y).to_array(),
                )
            }
            // Zero width disables the cutout in the shader.
            None => ([0.0; 4], [0.0; 4]),
        };

        self.instances.push(CircleInstance {
            center: [cmd.center.x, cmd.center.y],
            radius_bw: [cmd.radius, border_width],
            color0: paint.color0,
            color1: paint.color1,
            grad_p0: paint.grad_p0,
            grad_p1: paint.grad_p1,
            grad_params: paint.grad_params,
            border_color,
            cutout_rect,
            cutout_radii,
        });
        start..start + 1
    }

    /// Builds GPU resources on first use and uploads this frame's instances.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>) {
        if self.instances.len() == 0 {
            return;
        }
        self.pipeline.ensure(ctx, CircleInstance::layout());
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

/// Instance data layout (128 bytes):
///
///  offset   0  center       [f32; 2]   loc 1
///  offset   8  radius_bw    [f32; 2]   loc 2  (.x = radius, .y = border_width)
///  offset  16  color0       [f32; 4]   loc 3
///  offset  32  color1       [f32; 4]   loc 4
///  offset  48  grad_p0      [f32; 2]   loc 5
///  offset  56  grad_p1      [f32; 2]   loc 6
///  offset  64  grad_params  [f32; 4]   loc 7  (t0, t1, spread, _)
///  offset  80  border_color [f32; 4]   loc 8
///  offset  96  cutout_rect  [f32; 4]   loc 9  (x, y, w, h)
///  offset 112  cutout_radii [f32; 4]   loc 10 (tl, tr, br, bl)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    color0: [f32; 4],
    color1: [f32; 4],
    grad_p0: [f32; 2],
    grad_p1: [f32; 2],
    grad_params: [f32; 4],
    border_color: [f32; 4],
    cutout_rect: [f32; 4],
    cutout_radii: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
        1 => Float32x2,  // center
        2 => Float32x2,  // radius_bw
        3 => Float32x4,  // color0
        4 => Float32x4,  // color1
        5 => Float32x2,  // grad_p0
        6 => Float32x2,  // grad_p1
        7 => Float32x4,  // grad_params
        8 => Float32x4,  // border_color
        9 => Float32x4,  // cutout_rect
        10 => Float32x4  // cutout_radii
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Rect, Vec2};
    use crate::paint::{Color, Paint};
    use crate::scene::Cutout;

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 128);
    }

    #[test]
    fn degenerate_circles_are_culled() {
        let mut r = CircleRenderer::new();
        let cmd = CircleCmd::new(Vec2::new(10.0, 10.0), 0.0, Paint::Solid(Color::red()), None);
        assert!(r.push(&cmd).is_empty());
    }

    #[test]
    fn ranges_follow_push_order() {
        let mut r = CircleRenderer::new();
        let a = CircleCmd::new(Vec2::new(10.0, 10.0), 5.0, Paint::Solid(Color::red()), None);
        let b = a.clone().with_cutout(Cutout::new(
            Rect::new(10.0, 5.0, 20.0, 10.0),
            CornerRadii::all(40.0),
        ));
        assert_eq!(r.push(&a), 0..1);
        assert_eq!(r.push(&b), 1..2);
        r.begin_frame();
        assert_eq!(r.push(&b), 0..1);
    }

    #[test]
    fn cutout_radii_are_fitted_to_the_footprint() {
        let mut r = CircleRenderer::new();
        let cmd = CircleCmd::new(Vec2::zero(), 50.0, Paint::none(), None)
            .with_cutout(Cutout::new(Rect::new(0.0, -5.0, 40.0, 10.0), CornerRadii::all(14.0)));
        r.push(&cmd);
        assert_eq!(r.instances.staged()[0].cutout_radii, [5.0; 4]);
    }
}
