use std::ops::Range;

use crate::coords::Rect;
use crate::scene::{DrawCmd, DrawList, ShapeKind};
use crate::text::FontSystem;

use super::shapes::circle::CircleRenderer;
use super::shapes::rounded_rect::RoundedRectRenderer;
use super::shapes::text::TextRenderer;
use super::shapes::common::logical_clip_to_scissor;
use super::{RenderCtx, RenderTarget};

/// Consecutive draw items that share a renderer and a clip rect.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    kind: ShapeKind,
    clip: Option<Rect>,
    instances: Range<u32>,
}

/// Draws a `DrawList` in paint order within a single render pass.
///
/// Each frame runs in three steps:
/// 1. walk the list in paint order, staging every command in its shape
///    renderer and grouping consecutive same-kind, same-clip items into batches
/// 2. let each renderer upload its instances once
/// 3. replay the batches in one pass, switching pipeline and scissor as needed
///
/// Shapes of different kinds therefore interleave correctly by z-index.
#[derive(Default)]
pub struct SceneRenderer {
    circles: CircleRenderer,
    rounded_rects: RoundedRectRenderer,
    text: TextRenderer,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `draw_list` on top of the current contents of `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.stage(draw_list, fonts, ctx.scale_factor);
        if self.batches.is_empty() {
            return;
        }

        self.circles.prepare(ctx);
        self.rounded_rects.prepare(ctx);
        self.text.prepare(ctx);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dialclock scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            let Some((sx, sy, sw, sh)) =
                logical_clip_to_scissor(batch.clip, ctx.viewport, ctx.scale_factor)
            else {
                continue;
            };
            rpass.set_scissor_rect(sx, sy, sw, sh);

            match batch.kind {
                ShapeKind::Circle => self.circles.draw(&mut rpass, batch.instances.clone()),
                ShapeKind::RoundedRect => {
                    self.rounded_rects.draw(&mut rpass, batch.instances.clone())
                }
                ShapeKind::Text => self.text.draw(&mut rpass, batch.instances.clone()),
            }
        }
    }

    /// Stages every command and rebuilds the batch list. GPU-free.
    fn stage(&mut self, draw_list: &mut DrawList, fonts: &FontSystem, scale_factor: f32) {
        self.circles.begin_frame();
        self.rounded_rects.begin_frame();
        self.text.begin_frame();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            let range = match &item.cmd {
                DrawCmd::Circle(cmd) => self.circles.push(cmd),
                DrawCmd::RoundedRect(cmd) => self.rounded_rects.push(cmd),
                DrawCmd::Text(cmd) => self.text.push(cmd, fonts, scale_factor),
            };
            if range.is_empty() {
                continue;
            }

            let kind = item.cmd.kind();
            match self.batches.last_mut() {
                Some(last)
                    if last.kind == kind
                        && last.clip == item.clip_rect
                        && last.instances.end == range.start =>
                {
                    last.instances.end = range.end;
                }
                _ => self.batches.push(Batch { kind, clip: item.clip_rect, instances: range }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{CornerRadii, Vec2};
    use crate::paint::{Color, Paint};
    use crate::scene::{Border, ZIndex};

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn consecutive_same_kind_items_share_a_batch() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(ZIndex::new(0), Vec2::new(5.0, 5.0), 4.0, Color::black());
        dl.push_solid_circle(ZIndex::new(0), Vec2::new(5.0, 5.0), 3.0, Color::white());

        let mut r = SceneRenderer::new();
        r.stage(&mut dl, &FontSystem::new(), 1.0);

        assert_eq!(r.batches.len(), 1);
        assert_eq!(r.batches[0].instances, 0..2);
    }

    #[test]
    fn kinds_interleave_in_paint_order() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(ZIndex::new(0), Vec2::new(5.0, 5.0), 4.0, Color::black());
        dl.push_rounded_rect_outline(
            ZIndex::new(1),
            rect(),
            CornerRadii::all(2.0),
            Border::new(2.0, Color::red()),
        );
        dl.push_solid_circle(ZIndex::new(2), Vec2::new(5.0, 5.0), 3.0, Color::white());

        let mut r = SceneRenderer::new();
        r.stage(&mut dl, &FontSystem::new(), 1.0);

        let kinds: Vec<_> = r.batches.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![ShapeKind::Circle, ShapeKind::RoundedRect, ShapeKind::Circle]);
        assert_eq!(r.batches[2].instances, 1..2);
    }

    #[test]
    fn clip_change_splits_batches() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(ZIndex::new(0), Vec2::new(5.0, 5.0), 4.0, Color::black());
        dl.push_clip(rect());
        dl.push_circle(ZIndex::new(0), Vec2::new(5.0, 5.0), 3.0, Paint::solid(Color::red()), None);
        dl.pop_clip();

        let mut r = SceneRenderer::new();
        r.stage(&mut dl, &FontSystem::new(), 1.0);

        assert_eq!(r.batches.len(), 2);
        assert_eq!(r.batches[1].clip, Some(rect()));
    }

    #[test]
    fn culled_items_produce_no_batches() {
        let mut dl = DrawList::new();
        dl.push_solid_circle(ZIndex::new(0), Vec2::new(5.0, 5.0), 0.0, Color::black());

        let mut r = SceneRenderer::new();
        r.stage(&mut dl, &FontSystem::new(), 1.0);
        assert!(r.batches.is_empty());
    }
}
