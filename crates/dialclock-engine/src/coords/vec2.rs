use core::ops::{Add, Div, Mul, Neg, Sub};

use super::Degrees;

/// 2D vector in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Rotates the vector about the origin.
    ///
    /// With +Y pointing down, a positive angle turns the vector clockwise on screen.
    #[inline]
    pub fn rotated(self, angle: Degrees) -> Vec2 {
        let (sin, cos) = angle.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Point at `distance` from the origin, `angle` clockwise from 12 o'clock.
    #[inline]
    pub fn from_clock_angle(angle: Degrees, distance: f32) -> Vec2 {
        Vec2::new(0.0, -distance).rotated(angle)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn quarter_turn_is_clockwise_on_screen() {
        // +X (3 o'clock) turns to +Y (6 o'clock) with Y pointing down.
        let v = Vec2::new(1.0, 0.0).rotated(Degrees(90.0));
        assert!(approx(v, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn clock_angle_zero_points_up() {
        assert!(approx(Vec2::from_clock_angle(Degrees(0.0), 10.0), Vec2::new(0.0, -10.0)));
    }

    #[test]
    fn clock_angle_ninety_points_right() {
        assert!(approx(Vec2::from_clock_angle(Degrees(90.0), 10.0), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec2::new(3.0, 4.0).rotated(Degrees(-117.0));
        assert!((v.length() - 5.0).abs() < 1e-4);
    }
}
