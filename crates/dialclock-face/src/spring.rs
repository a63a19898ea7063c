//! Damped-spring integrator for disc rotation.
//!
//! Each step evaluates the analytic solution of a unit-mass damped harmonic
//! oscillator over `dt`, so the result does not depend on the frame rate.

/// Spring parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpringConfig {
    /// 1.0 is critically damped; below 1.0 overshoots.
    pub damping_ratio: f32,
    /// Spring constant for a unit mass; the natural frequency is `sqrt(stiffness)`.
    pub stiffness: f32,
    /// Displacement and speed below which the spring snaps to rest.
    pub visibility_threshold: f32,
}

impl SpringConfig {
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

    pub const fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self { damping_ratio, stiffness, visibility_threshold: 0.01 }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCY, Self::STIFFNESS_MEDIUM_LOW)
    }
}

/// Animated scalar following a target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spring {
    value: f32,
    target: f32,
    velocity: f32,
    config: SpringConfig,
}

impl Spring {
    /// Starts at rest on `initial`.
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self { value: initial, target: initial, velocity: 0.0, config }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Moves the target. Current value and velocity carry over.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jumps to `value` and stops.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advances the spring by `dt` seconds and returns the new value.
    pub fn step(&mut self, dt: f32) -> f32 {
        if self.is_settled() || !(dt > 0.0) {
            return self.value;
        }

        let (x, v) = oscillate(self.value - self.target, self.velocity, dt, &self.config);

        let threshold = self.config.visibility_threshold;
        if x.abs() < threshold && v.abs() < threshold {
            self.value = self.target;
            self.velocity = 0.0;
        } else {
            self.value = self.target + x;
            self.velocity = v;
        }
        self.value
    }
}

/// Displacement and velocity after `t` seconds from `(x0, v0)`.
fn oscillate(x0: f32, v0: f32, t: f32, config: &SpringConfig) -> (f32, f32) {
    let omega = config.stiffness.max(0.0).sqrt();
    let zeta = config.damping_ratio.max(0.0);

    if omega == 0.0 {
        return (x0 + v0 * t, v0);
    }

    if (zeta - 1.0).abs() < 1e-4 {
        let c = v0 + omega * x0;
        let decay = (-omega * t).exp();
        return ((x0 + c * t) * decay, (v0 - omega * c * t) * decay);
    }

    if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let a = x0;
        let b = (v0 + zeta * omega * x0) / omega_d;
        let decay = (-zeta * omega * t).exp();
        let (sin, cos) = (omega_d * t).sin_cos();
        let x = decay * (a * cos + b * sin);
        let v = decay * ((b * omega_d - zeta * omega * a) * cos - (a * omega_d + zeta * omega * b) * sin);
        return (x, v);
    }

    let root = (zeta * zeta - 1.0).sqrt();
    let r1 = -omega * (zeta - root);
    let r2 = -omega * (zeta + root);
    let c2 = (r1 * x0 - v0) / (r1 - r2);
    let c1 = x0 - c2;
    let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
    (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn run(spring: &mut Spring, seconds: f32) -> Vec<f32> {
        let frames = (seconds / FRAME).round() as usize;
        (0..frames).map(|_| spring.step(FRAME)).collect()
    }

    #[test]
    fn starts_at_rest() {
        let mut s = Spring::new(90.0, SpringConfig::default());
        assert!(s.is_settled());
        assert_eq!(s.step(FRAME), 90.0);
    }

    #[test]
    fn medium_bouncy_overshoots_then_settles() {
        let mut s = Spring::new(90.0, SpringConfig::default());
        s.set_target(67.0);
        let path = run(&mut s, 2.0);

        let lowest = path.iter().copied().fold(f32::INFINITY, f32::min);
        assert!(lowest < 67.0, "expected overshoot, min was {lowest}");
        assert!(s.is_settled());
        assert_eq!(s.value(), 67.0);
    }

    #[test]
    fn critically_damped_does_not_overshoot() {
        let mut s = Spring::new(0.0, SpringConfig::new(1.0, 400.0));
        s.set_target(100.0);
        let path = run(&mut s, 1.0);
        assert!(path.iter().all(|&v| v <= 100.0 + 1e-3));
        assert!(path.windows(2).all(|w| w[1] >= w[0] - 1e-4));
    }

    #[test]
    fn overdamped_converges_slowly_without_overshoot() {
        let mut s = Spring::new(0.0, SpringConfig::new(2.0, 400.0));
        s.set_target(10.0);
        let path = run(&mut s, 3.0);
        assert!(path.iter().all(|&v| v <= 10.0 + 1e-3));
        assert!((s.value() - 10.0).abs() < 0.05);
    }

    #[test]
    fn retargeting_keeps_velocity() {
        let mut s = Spring::new(90.0, SpringConfig::default());
        s.set_target(0.0);
        s.step(FRAME * 3.0);
        let v = s.velocity();
        assert!(v < 0.0);

        s.set_target(-23.0);
        assert_eq!(s.velocity(), v);
    }

    #[test]
    fn step_size_does_not_change_the_trajectory() {
        let mut coarse = Spring::new(0.0, SpringConfig::default());
        let mut fine = coarse;
        coarse.set_target(50.0);
        fine.set_target(50.0);

        coarse.step(0.04);
        for _ in 0..4 {
            fine.step(0.01);
        }
        assert!((coarse.value() - fine.value()).abs() < 1e-2);
        assert!((coarse.velocity() - fine.velocity()).abs() < 1e-1);
    }

    #[test]
    fn non_positive_dt_is_ignored() {
        let mut s = Spring::new(0.0, SpringConfig::default());
        s.set_target(10.0);
        assert_eq!(s.step(0.0), 0.0);
        assert_eq!(s.step(-1.0), 0.0);
        assert_eq!(s.step(f32::NAN), 0.0);
    }
}
