use dialclock_engine::coords::{CornerRadii, Degrees, Rect, Vec2};
use dialclock_engine::paint::{Color, Paint};
use dialclock_engine::scene::{Border, Cutout, DrawList, ZIndex};
use dialclock_engine::text::{FontId, FontSystem};

/// Drawing surface the clock face paints into.
///
/// Wraps the engine's `DrawList`; every call lands one layer above the
/// previous one, so paint order is call order.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem) -> Self {
        Self { draw_list, font_system, z: 0 }
    }

    /// Single-line text extent at `size`.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.font_system.measure_text(text, font, size)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Circle with optional border.
    pub fn fill_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        let z = self.next_z();
        self.draw_list.push_circle(z, center, radius, paint.into(), border);
    }

    /// Filled circle with a rounded-rectangle hole.
    pub fn fill_circle_except(
        &mut self,
        center: Vec2,
        radius: f32,
        paint: impl Into<Paint>,
        hole: Rect,
        hole_radii: CornerRadii,
    ) {
        let z = self.next_z();
        self.draw_list
            .push_circle_with_cutout(z, center, radius, paint.into(), Cutout::new(hole, hole_radii));
    }

    /// Ring of `width` drawn just inside `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.fill_circle(center, radius, Paint::none(), Some(Border::new(width, color)));
    }

    /// Outline of a rounded rectangle, stroke centered on the rect's edge.
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        let half = width * 0.5;
        let outer = Rect::new(
            rect.origin.x - half,
            rect.origin.y - half,
            rect.size.x + width,
            rect.size.y + width,
        );
        let z = self.next_z();
        self.draw_list.push_rounded_rect_outline(
            z,
            outer,
            CornerRadii::all(radius + half),
            Border::new(width, color),
        );
    }

    /// Text centered in `bounds`, the whole box turned by `rotation` about its center.
    pub fn text_in_box(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        bounds: Rect,
        rotation: Degrees,
    ) {
        let text = text.into();
        let extent = self.measure_text(&text, font, size);
        let center = bounds.center();
        let origin = bounds.origin + (bounds.size - extent) * 0.5;
        let z = self.next_z();
        self.draw_list.push_rotated_text(z, text, font, size, color, origin, rotation, center);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialclock_engine::scene::DrawCmd;

    #[test]
    fn calls_stack_upward() {
        let fonts = FontSystem::new();
        let mut dl = DrawList::new();
        {
            let mut p = Painter::new(&mut dl, &fonts);
            p.fill_circle(Vec2::zero(), 10.0, Color::black(), None);
            p.stroke_circle(Vec2::zero(), 10.0, Color::red(), 2.0);
        }
        let z: Vec<_> = dl.items().iter().map(|i| i.key.z).collect();
        assert_eq!(z, vec![ZIndex::new(0), ZIndex::new(1)]);
    }

    #[test]
    fn rounded_rect_stroke_straddles_the_edge() {
        let fonts = FontSystem::new();
        let mut dl = DrawList::new();
        Painter::new(&mut dl, &fonts).stroke_rounded_rect(
            Rect::new(10.0, 10.0, 100.0, 28.0),
            14.0,
            Color::red(),
            2.0,
        );
        let DrawCmd::RoundedRect(cmd) = &dl.items()[0].cmd else {
            panic!("expected a rounded rect");
        };
        assert_eq!(cmd.rect, Rect::new(9.0, 9.0, 102.0, 30.0));
        assert_eq!(cmd.radii, CornerRadii::all(15.0));
        assert_eq!(cmd.paint, Paint::none());
    }
}
