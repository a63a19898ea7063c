use dialclock_engine::coords::{CornerRadii, Degrees, Rect, Vec2};
use dialclock_engine::scene::Border;
use dialclock_engine::text::FontId;

use crate::disc::{layout_labels, DiscRole, DiscSpec};
use crate::painter::Painter;
use crate::spring::{Spring, SpringConfig};
use crate::stripes::create_stripe_brush;
use crate::style::FaceStyle;
use crate::time_source::TimeOfDay;

/// One rotating disc: what it shows and how far it has turned.
#[derive(Debug, Clone)]
struct Disc {
    role: DiscRole,
    spec: DiscSpec,
    angle: Spring,
}

/// The whole clock: four discs plus the static rings and overlay.
///
/// `set_time` retargets the discs; `advance` moves them; `paint` records the
/// current state into a draw list without changing it.
#[derive(Debug, Clone)]
pub struct ClockFace {
    style: FaceStyle,
    time: TimeOfDay,
    discs: [Disc; 4],
}

impl ClockFace {
    /// Face showing 00:00 with every disc at rest.
    pub fn new(style: FaceStyle, spring: SpringConfig) -> Self {
        let time = TimeOfDay::MIDNIGHT;
        let discs = DiscRole::ALL.map(|role| {
            let spec = DiscSpec::for_time(role, style.disc_radii[role.index()], time);
            let angle = Spring::new(spec.target_angle(style.angle_step).0, spring);
            Disc { role, spec, angle }
        });
        Self { style, time, discs }
    }

    #[inline]
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    #[inline]
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    /// Shows `time`. Returns `false` (and does nothing) if it is already shown.
    pub fn set_time(&mut self, time: TimeOfDay) -> bool {
        if time == self.time {
            return false;
        }
        self.time = time;

        let step = self.style.angle_step;
        for disc in &mut self.discs {
            let radius = self.style.disc_radii[disc.role.index()];
            disc.spec = DiscSpec::for_time(disc.role, radius, time);
            disc.angle.set_target(disc.spec.target_angle(step).0);
        }

        log::debug!("face retargeted to {time}: {:?}", self.targets().map(|d| d.0));
        true
    }

    /// Steps every disc spring by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for disc in &mut self.discs {
            disc.angle.step(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.discs.iter().any(|d| !d.angle.is_settled())
    }

    /// Current disc angles, minute-units first.
    pub fn angles(&self) -> [Degrees; 4] {
        self.discs.each_ref().map(|d| Degrees(d.angle.value()))
    }

    /// Angles the discs are heading to, minute-units first.
    pub fn targets(&self) -> [Degrees; 4] {
        self.discs.each_ref().map(|d| Degrees(d.angle.target()))
    }

    pub fn specs(&self) -> [DiscSpec; 4] {
        self.discs.each_ref().map(|d| d.spec)
    }

    /// Square the face occupies when centered on `center`.
    pub fn bounds(&self, center: Vec2) -> Rect {
        Rect::centered_square(center, self.style.face_radius())
    }

    /// Records the face centered on `center`. Labels are skipped without a font.
    pub fn paint(&self, painter: &mut Painter<'_>, center: Vec2, font: Option<FontId>) {
        let s = &self.style;

        self.paint_ring(painter, center, s.outer_ring_radius);
        for disc in &self.discs[..2] {
            self.paint_disc(painter, center, disc, font);
        }
        self.paint_ring(painter, center, s.inner_ring_radius);
        for disc in &self.discs[2..] {
            self.paint_disc(painter, center, disc, font);
        }

        self.paint_overlay(painter, center);
    }

    fn border(&self) -> Option<Border> {
        Some(Border::new(self.style.border_width, self.style.border))
    }

    fn paint_ring(&self, painter: &mut Painter<'_>, center: Vec2, radius: f32) {
        painter.fill_circle(center, radius, self.style.fill, self.border());
    }

    fn paint_disc(&self, painter: &mut Painter<'_>, center: Vec2, disc: &Disc, font: Option<FontId>) {
        let s = &self.style;
        let radius = disc.spec.radius();
        painter.fill_circle(center, radius, s.fill, self.border());

        let Some(font) = font else { return };
        let angle = Degrees(disc.angle.value());
        let labels = layout_labels(
            center,
            radius,
            angle,
            disc.spec.allowed_digits(),
            s.angle_step,
            s.label_offset,
        );
        for label in labels {
            painter.text_in_box(
                label.digit.to_string(),
                font,
                s.label_size,
                s.label_color,
                Rect::centered_square(label.center, s.label_box * 0.5),
                label.rotation,
            );
        }
    }

    /// Pointer bar, stripes around it, and the outer rim.
    fn paint_overlay(&self, painter: &mut Painter<'_>, center: Vec2) {
        let s = &self.style;
        let radius = s.face_radius();

        painter.push_clip(self.bounds(center));

        let pointer = self.pointer_rect(center);
        painter.stroke_rounded_rect(pointer, s.pointer_half_height, s.accent, s.pointer_stroke);

        // Stripe phase is anchored to the face's top-left corner.
        let mut brush = create_stripe_brush(s.accent, s.stripe_width, s.stripe_to_gap_ratio);
        let corner = self.bounds(center).origin;
        brush.start = brush.start + corner;
        brush.end = brush.end + corner;
        painter.fill_circle_except(
            center,
            radius,
            brush,
            pointer,
            CornerRadii::all(s.pointer_half_height),
        );

        // The rim stroke is centered on the edge; the face hides its outer half.
        painter.stroke_circle(center, radius, s.accent, s.outer_stroke * 0.5);

        painter.pop_clip();
    }

    /// Pointer footprint: from the center to just short of the right edge.
    pub fn pointer_rect(&self, center: Vec2) -> Rect {
        let s = &self.style;
        let length = s.face_radius() - s.pointer_inset;
        Rect::new(
            center.x,
            center.y - s.pointer_half_height,
            length,
            s.pointer_half_height * 2.0,
        )
    }
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new(FaceStyle::default(), SpringConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialclock_engine::paint::Paint;
    use dialclock_engine::scene::{DrawCmd, DrawList};
    use dialclock_engine::text::FontSystem;

    fn record(face: &ClockFace) -> DrawList {
        let fonts = FontSystem::new();
        let mut dl = DrawList::new();
        let mut painter = Painter::new(&mut dl, &fonts);
        face.paint(&mut painter, Vec2::new(200.0, 200.0), None);
        dl
    }

    #[test]
    fn starts_at_rest_on_midnight() {
        let face = ClockFace::default();
        assert_eq!(face.time(), TimeOfDay::MIDNIGHT);
        assert_eq!(face.angles(), [Degrees(90.0); 4]);
        assert!(!face.is_animating());
    }

    #[test]
    fn set_time_retargets_once() {
        let mut face = ClockFace::default();
        let t = TimeOfDay::new(23, 59).unwrap();
        assert!(face.set_time(t));
        assert!(!face.set_time(t));
        assert_eq!(face.targets().map(|d| d.0), [-117.0, -25.0, 21.0, 44.0]);
        // Targets move immediately; angles only through `advance`.
        assert_eq!(face.angles(), [Degrees(90.0); 4]);
        assert!(face.is_animating());
    }

    #[test]
    fn discs_settle_on_their_targets() {
        let mut face = ClockFace::default();
        face.set_time(TimeOfDay::new(12, 34).unwrap());
        for _ in 0..240 {
            face.advance(1.0 / 60.0);
        }
        assert!(!face.is_animating());
        assert_eq!(face.angles(), face.targets());

        let digits: Vec<u8> = face.specs().iter().map(|s| s.displayed_digit()).collect();
        assert_eq!(digits, vec![4, 3, 2, 1]);
    }

    #[test]
    fn painting_twice_records_the_same_list() {
        let mut face = ClockFace::default();
        face.set_time(TimeOfDay::new(9, 41).unwrap());
        face.advance(0.05);

        let a = record(&face);
        let b = record(&face);
        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn layers_rings_discs_then_overlay() {
        let face = ClockFace::default();
        let dl = record(&face);

        let radii: Vec<f32> = dl
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                DrawCmd::Circle(c) if c.cutout.is_none() && c.paint != Paint::none() => Some(c.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![130.0, 125.0, 105.0, 85.0, 80.0, 60.0]);

        // Overlay is clipped to the face; nothing else is.
        let clipped = dl.items().iter().filter(|i| i.clip_rect.is_some()).count();
        assert_eq!(clipped, 3);
        assert!(matches!(dl.items().last().map(|i| &i.cmd), Some(DrawCmd::Circle(c)) if c.border.is_some()));
    }

    #[test]
    fn pointer_runs_from_center_to_inset_edge() {
        let face = ClockFace::default();
        let r = face.pointer_rect(Vec2::new(200.0, 200.0));
        assert_eq!(r, Rect::new(200.0, 186.0, 125.0, 28.0));
    }
}
