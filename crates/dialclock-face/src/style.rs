use dialclock_engine::paint::Color;

/// Geometry and colors of the clock face, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceStyle {
    /// Minute-units, minute-tens, hour-units, hour-tens.
    pub disc_radii: [f32; 4],
    /// Background ring behind the minute discs.
    pub outer_ring_radius: f32,
    /// Background ring behind the hour discs.
    pub inner_ring_radius: f32,

    pub fill: Color,
    pub border: Color,
    pub border_width: f32,

    /// Degrees between neighbouring digit labels.
    pub angle_step: f32,
    /// Distance from a disc's rim to its label centers.
    pub label_offset: f32,
    /// Side of the square box each label is centered in.
    pub label_box: f32,
    pub label_size: f32,
    pub label_color: Color,

    pub accent: Color,
    /// Gap between the pointer's right end and the face edge.
    pub pointer_inset: f32,
    pub pointer_half_height: f32,
    pub pointer_stroke: f32,
    pub outer_stroke: f32,

    pub stripe_width: f32,
    pub stripe_to_gap_ratio: f32,
}

impl FaceStyle {
    /// Radius of the whole face (the outer background ring).
    #[inline]
    pub fn face_radius(&self) -> f32 {
        self.outer_ring_radius
    }
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            disc_radii: [125.0, 105.0, 80.0, 60.0],
            outer_ring_radius: 130.0,
            inner_ring_radius: 85.0,

            fill: Color::light_gray(),
            border: Color::black(),
            border_width: 1.0,

            angle_step: 23.0,
            label_offset: 10.0,
            label_box: 20.0,
            label_size: 16.0,
            label_color: Color::black(),

            accent: Color::red(),
            pointer_inset: 5.0,
            pointer_half_height: 14.0,
            pointer_stroke: 2.0,
            outer_stroke: 4.0,

            stripe_width: 2.0,
            stripe_to_gap_ratio: 0.6,
        }
    }
}
