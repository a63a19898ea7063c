use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    /// Maps a raw axis parameter into `[0, 1]`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }

    /// Numeric code uploaded to the shaders.
    #[inline]
    pub(crate) fn shader_code(self) -> f32 {
        match self {
            SpreadMode::Pad => 0.0,
            SpreadMode::Repeat => 1.0,
            SpreadMode::Reflect => 2.0,
        }
    }
}

/// A single gradient stop.
///
/// `t` is expected in [0, 1]. Two stops at the same `t` form a hard edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - The axis parameter is 0 at `start` and 1 at `end`.
/// - Renderers honor the first and last stop only.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self {
            start,
            end,
            stops,
            spread,
        }
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    /// Axis parameter of `p` after the spread mode is applied.
    pub fn t_at(&self, p: Vec2) -> f32 {
        let axis = self.end - self.start;
        let len2 = axis.x * axis.x + axis.y * axis.y;
        if len2 <= f32::EPSILON {
            return 0.0;
        }
        let d = p - self.start;
        self.spread.apply((d.x * axis.x + d.y * axis.y) / len2)
    }

    /// Evaluates the gradient at `p` the same way the shaders do.
    pub fn sample(&self, p: Vec2) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::transparent();
        };
        let t = self.t_at(p);
        let span = last.t - first.t;
        let k = if span.abs() <= f32::EPSILON {
            if t >= first.t { 1.0 } else { 0.0 }
        } else {
            ((t - first.t) / span).clamp(0.0, 1.0)
        };
        let lerp = |a: f32, b: f32| a + (b - a) * k;
        Color::from_premul(
            lerp(first.color.r, last.color.r),
            lerp(first.color.g, last.color.g),
            lerp(first.color.b, last.color.b),
            lerp(first.color.a, last.color.a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard_edge(at: f32, spread: SpreadMode) -> LinearGradient {
        LinearGradient::new(
            Vec2::zero(),
            Vec2::new(10.0, 0.0),
            vec![ColorStop::new(at, Color::transparent()), ColorStop::new(at, Color::red())],
            spread,
        )
    }

    #[test]
    fn spread_modes_map_into_unit_range() {
        assert_eq!(SpreadMode::Pad.apply(1.5), 1.0);
        assert_eq!(SpreadMode::Pad.apply(-0.5), 0.0);
        assert!((SpreadMode::Repeat.apply(2.25) - 0.25).abs() < 1e-6);
        assert!((SpreadMode::Repeat.apply(-0.25) - 0.75).abs() < 1e-6);
        assert!((SpreadMode::Reflect.apply(1.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn hard_edge_switches_at_stop() {
        let g = hard_edge(0.5, SpreadMode::Pad);
        assert_eq!(g.sample(Vec2::new(4.0, 0.0)), Color::transparent());
        assert_eq!(g.sample(Vec2::new(6.0, 0.0)), Color::red());
    }

    #[test]
    fn repeat_tiles_along_axis() {
        let g = hard_edge(0.5, SpreadMode::Repeat);
        assert_eq!(g.sample(Vec2::new(24.0, 0.0)), Color::transparent());
        assert_eq!(g.sample(Vec2::new(27.0, 0.0)), Color::red());
        assert_eq!(g.sample(Vec2::new(-3.0, 0.0)), Color::red());
    }

    #[test]
    fn perpendicular_offset_does_not_change_t() {
        let g = hard_edge(0.5, SpreadMode::Repeat);
        assert_eq!(g.t_at(Vec2::new(3.0, 0.0)), g.t_at(Vec2::new(3.0, 99.0)));
    }

    #[test]
    fn single_axis_point_is_invalid() {
        let mut g = hard_edge(0.5, SpreadMode::Pad);
        g.end = g.start;
        assert!(!g.is_valid());
    }
}
