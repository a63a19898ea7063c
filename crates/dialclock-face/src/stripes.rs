use dialclock_engine::coords::Vec2;
use dialclock_engine::paint::{Color, ColorStop, LinearGradient, SpreadMode};

/// Sizes of one stripe tile along the gradient axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StripeGeometry {
    pub gap: f32,
    pub period: f32,
    /// Axis position (0..1 within a period) where the gap ends and the stripe starts.
    pub transition: f32,
}

impl StripeGeometry {
    pub fn new(stripe_width: f32, stripe_to_gap_ratio: f32) -> Self {
        let gap = stripe_width / stripe_to_gap_ratio;
        let period = stripe_width + gap;
        Self { gap, period, transition: gap / period }
    }
}

/// Repeating hard-edged stripes along +X: a transparent gap, then a solid
/// `color` stripe `stripe_width` wide, tiled forever.
pub fn create_stripe_brush(color: Color, stripe_width: f32, stripe_to_gap_ratio: f32) -> LinearGradient {
    let geo = StripeGeometry::new(stripe_width, stripe_to_gap_ratio);
    LinearGradient::new(
        Vec2::zero(),
        Vec2::new(geo.period, 0.0),
        vec![
            ColorStop::new(geo.transition, Color::transparent()),
            ColorStop::new(geo.transition, color),
        ],
        SpreadMode::Repeat,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_face_stripes() {
        let geo = StripeGeometry::new(2.0, 0.6);
        assert!((geo.gap - 3.333_333).abs() < 1e-4);
        assert!((geo.period - 5.333_333).abs() < 1e-4);
        assert!((geo.transition - 0.625).abs() < 1e-6);
    }

    #[test]
    fn brush_alternates_gap_and_stripe() {
        let brush = create_stripe_brush(Color::red(), 2.0, 0.6);
        let period = brush.end.x;

        assert_eq!(brush.sample(Vec2::new(1.0, 0.0)), Color::transparent());
        assert_eq!(brush.sample(Vec2::new(4.5, 0.0)), Color::red());
        // Tiled: one period later, same color; y does not matter.
        assert_eq!(brush.sample(Vec2::new(1.0 + period, 37.0)), Color::transparent());
        assert_eq!(brush.sample(Vec2::new(4.5 - period, -3.0)), Color::red());
    }

    proptest! {
        #[test]
        fn transition_is_gap_over_period(width in 0.1f32..50.0, ratio in 0.05f32..20.0) {
            let geo = StripeGeometry::new(width, ratio);
            let expected = geo.gap / (geo.gap + width);
            prop_assert!((geo.transition - expected).abs() < 1e-5);
            prop_assert!(geo.transition > 0.0 && geo.transition < 1.0);
        }

        #[test]
        fn transition_ignores_uniform_scale(width in 0.1f32..50.0, ratio in 0.05f32..20.0, k in 0.1f32..10.0) {
            let a = StripeGeometry::new(width, ratio).transition;
            let b = StripeGeometry::new(width * k, ratio).transition;
            prop_assert!((a - b).abs() < 1e-4);
        }
    }
}
