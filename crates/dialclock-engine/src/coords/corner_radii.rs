/// Per-corner radii for a rounded rectangle (logical pixels).
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Negative values are treated as zero by renderers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// Clamps every corner so that no radius exceeds half of the shorter side.
    #[inline]
    pub fn fitted(self, width: f32, height: f32) -> Self {
        let limit = (width.min(height) * 0.5).max(0.0);
        let fit = |r: f32| r.clamp(0.0, limit);
        Self {
            top_left: fit(self.top_left),
            top_right: fit(self.top_right),
            bottom_right: fit(self.bottom_right),
            bottom_left: fit(self.bottom_left),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_clamps_to_half_short_side() {
        let r = CornerRadii::all(40.0).fitted(120.0, 28.0);
        assert_eq!(r, CornerRadii::all(14.0));
    }

    #[test]
    fn fitted_zeroes_negative_radii() {
        let r = CornerRadii::new(-1.0, 2.0, 3.0, 4.0).fitted(100.0, 100.0);
        assert_eq!(r.to_array(), [0.0, 2.0, 3.0, 4.0]);
    }
}
