pub(crate) mod circle;
pub(crate) mod rounded_rect;
pub(crate) mod text;

use crate::coords::{CornerRadii, Rect};
use crate::paint::Color;

/// Stroke drawn along the inner edge of a shape's outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Rounded-rectangle footprint removed from a shape's fill and border.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cutout {
    pub rect: Rect,
    pub radii: CornerRadii,
}

impl Cutout {
    #[inline]
    pub fn new(rect: Rect, radii: CornerRadii) -> Self {
        Self { rect, radii }
    }
}
