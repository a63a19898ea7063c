use core::ops::{Add, Mul, Neg, Sub};

/// Angle in degrees.
///
/// Positive values turn clockwise on screen (the CPU space has +Y down).
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Degrees(pub f32);

impl Degrees {
    #[inline]
    pub const fn new(v: f32) -> Self {
        Self(v)
    }

    #[inline]
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Degrees {
    type Output = Degrees;
    #[inline]
    fn add(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Degrees;
    #[inline]
    fn sub(self, rhs: Degrees) -> Degrees {
        Degrees(self.0 - rhs.0)
    }
}

impl Neg for Degrees {
    type Output = Degrees;
    #[inline]
    fn neg(self) -> Degrees {
        Degrees(-self.0)
    }
}

impl Mul<f32> for Degrees {
    type Output = Degrees;
    #[inline]
    fn mul(self, rhs: f32) -> Degrees {
        Degrees(self.0 * rhs)
    }
}
