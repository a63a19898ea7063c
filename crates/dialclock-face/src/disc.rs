//! Disc model: which digits a disc carries, which one faces the pointer, and
//! where each label sits.

use dialclock_engine::coords::{Degrees, Vec2};

use crate::time_source::TimeOfDay;

/// Angle of the disc when its first digit faces the pointer.
pub const BASE_ANGLE: f32 = 90.0;

const DECIMAL: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
const HOUR_TENS: [u8; 3] = [0, 1, 2];

/// The four discs, in paint order (largest first).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DiscRole {
    MinuteUnits,
    MinuteTens,
    HourUnits,
    HourTens,
}

impl DiscRole {
    pub const ALL: [DiscRole; 4] =
        [DiscRole::MinuteUnits, DiscRole::MinuteTens, DiscRole::HourUnits, DiscRole::HourTens];

    /// Digits printed on this disc, in label order.
    pub fn allowed_digits(self) -> &'static [u8] {
        match self {
            DiscRole::HourTens => &HOUR_TENS,
            _ => &DECIMAL,
        }
    }

    /// The digit of `time` this disc shows.
    pub fn digit_of(self, time: TimeOfDay) -> u8 {
        match self {
            DiscRole::MinuteUnits => time.minute_units(),
            DiscRole::MinuteTens => time.minute_tens(),
            DiscRole::HourUnits => time.hour_units(),
            DiscRole::HourTens => time.hour_tens(),
        }
    }

    /// Position in `ALL`, also the index into `FaceStyle::disc_radii`.
    pub fn index(self) -> usize {
        match self {
            DiscRole::MinuteUnits => 0,
            DiscRole::MinuteTens => 1,
            DiscRole::HourUnits => 2,
            DiscRole::HourTens => 3,
        }
    }
}

/// One disc for one time value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DiscSpec {
    radius: f32,
    displayed_digit: u8,
    allowed_digits: &'static [u8],
}

impl DiscSpec {
    /// # Panics
    /// If `displayed_digit` is not in `allowed_digits`.
    pub fn new(radius: f32, displayed_digit: u8, allowed_digits: &'static [u8]) -> Self {
        assert!(
            allowed_digits.contains(&displayed_digit),
            "digit {displayed_digit} is not on a disc carrying {allowed_digits:?}"
        );
        Self { radius, displayed_digit, allowed_digits }
    }

    pub fn for_time(role: DiscRole, radius: f32, time: TimeOfDay) -> Self {
        Self::new(radius, role.digit_of(time), role.allowed_digits())
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn displayed_digit(&self) -> u8 {
        self.displayed_digit
    }

    #[inline]
    pub fn allowed_digits(&self) -> &'static [u8] {
        self.allowed_digits
    }

    /// Label index of the displayed digit.
    ///
    /// # Panics
    /// If the displayed digit is not on this disc.
    pub fn index(&self) -> usize {
        self.allowed_digits
            .iter()
            .position(|&d| d == self.displayed_digit)
            .unwrap_or_else(|| {
                panic!(
                    "digit {} is not on a disc carrying {:?}",
                    self.displayed_digit, self.allowed_digits
                )
            })
    }

    /// Rotation that brings the displayed digit under the pointer.
    pub fn target_angle(&self, step: f32) -> Degrees {
        target_angle(self.index(), step)
    }
}

/// `BASE_ANGLE − index × step`, recomputed from scratch for every value.
#[inline]
pub fn target_angle(index: usize, step: f32) -> Degrees {
    Degrees(BASE_ANGLE - index as f32 * step)
}

/// Where one digit label is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelPlacement {
    pub digit: u8,
    /// Center of the label box in face coordinates.
    pub center: Vec2,
    /// Clockwise rotation of the label box about `center`.
    pub rotation: Degrees,
}

/// Places every label of `allowed_digits` on a disc rotated by `disc_angle`.
///
/// Label `i` sits at `i × step` around the disc, `offset` inside the rim, and
/// is turned −90° so digits read along the radius.
pub fn layout_labels(
    center: Vec2,
    radius: f32,
    disc_angle: Degrees,
    allowed_digits: &[u8],
    step: f32,
    offset: f32,
) -> impl Iterator<Item = LabelPlacement> + '_ {
    allowed_digits.iter().enumerate().map(move |(i, &digit)| {
        let angle = disc_angle + Degrees(i as f32 * step);
        LabelPlacement {
            digit,
            center: center + Vec2::from_clock_angle(angle, radius - offset),
            rotation: angle - Degrees(90.0),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn targets(time: TimeOfDay) -> [f32; 4] {
        DiscRole::ALL.map(|role| DiscSpec::for_time(role, 100.0, time).target_angle(23.0).0)
    }

    #[test]
    fn midnight_points_every_disc_at_ninety() {
        assert_eq!(targets(TimeOfDay::MIDNIGHT), [90.0; 4]);
    }

    #[test]
    fn last_minute_of_the_day() {
        let t = TimeOfDay::new(23, 59).unwrap();
        // minute-units, minute-tens, hour-units, hour-tens
        assert_eq!(targets(t), [-117.0, -25.0, 21.0, 44.0]);
    }

    #[test]
    fn hour_tens_disc_only_carries_three_digits() {
        assert_eq!(DiscRole::HourTens.allowed_digits(), &[0, 1, 2]);
        assert_eq!(DiscRole::MinuteTens.allowed_digits().len(), 10);
    }

    #[test]
    #[should_panic(expected = "is not on a disc")]
    fn foreign_digit_is_a_defect() {
        let _ = DiscSpec::new(60.0, 3, DiscRole::HourTens.allowed_digits());
    }

    #[test]
    #[should_panic(expected = "digit 7 is not on a disc")]
    fn target_of_foreign_digit_is_a_defect() {
        let spec = DiscSpec { radius: 60.0, displayed_digit: 7, allowed_digits: &HOUR_TENS };
        let _ = spec.target_angle(23.0);
    }

    #[test]
    fn accessors_expose_constructed_values() {
        let spec = DiscSpec::new(80.0, 9, DiscRole::HourUnits.allowed_digits());
        assert_eq!(spec.radius(), 80.0);
        assert_eq!(spec.displayed_digit(), 9);
        assert_eq!(spec.allowed_digits(), &DECIMAL);
        assert_eq!(spec.index(), 9);
    }

    #[test]
    fn first_label_sits_under_the_pointer_at_base_angle() {
        let labels: Vec<_> =
            layout_labels(Vec2::zero(), 125.0, Degrees(BASE_ANGLE), &DECIMAL, 23.0, 10.0).collect();
        assert_eq!(labels.len(), 10);

        // 90° clockwise from 12 o'clock is 3 o'clock: on the pointer's axis.
        let first = labels[0];
        assert!((first.center.x - 115.0).abs() < 1e-3);
        assert!(first.center.y.abs() < 1e-3);
        assert_eq!(first.rotation, Degrees(0.0));
    }

    #[test]
    fn labels_keep_their_spacing_when_the_disc_turns() {
        let a: Vec<_> =
            layout_labels(Vec2::zero(), 80.0, Degrees(10.0), &DECIMAL, 23.0, 10.0).collect();
        let b: Vec<_> =
            layout_labels(Vec2::zero(), 80.0, Degrees(-57.0), &DECIMAL, 23.0, 10.0).collect();
        for (la, lb) in a.iter().zip(&b) {
            assert!((la.center.length() - 70.0).abs() < 1e-3);
            assert!((lb.center.length() - 70.0).abs() < 1e-3);
            assert!(((la.rotation - lb.rotation).0 - 67.0).abs() < 1e-4);
        }
    }

    proptest! {
        #[test]
        fn target_is_a_pure_function_of_the_index(n in 0u16..1440) {
            let t = TimeOfDay::from_minute_of_day(n);
            for role in DiscRole::ALL {
                let spec = DiscSpec::for_time(role, 50.0, t);
                prop_assert!(spec.allowed_digits.contains(&spec.displayed_digit));
                let expected = 90.0 - 23.0 * spec.index() as f32;
                prop_assert_eq!(spec.target_angle(23.0).0, expected);
                prop_assert_eq!(spec.target_angle(23.0), spec.target_angle(23.0));
            }
        }
    }
}
