//! Six-way board orientation from a single acceleration sample.

use accelerometer::vector::I16x3;

/// Raw acceleration along the board axes at one sampling instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelerationSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelerationSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

impl From<I16x3> for AccelerationSample {
    fn from(v: I16x3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Which face or edge of the board points away from the ground.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrientationState {
    /// No classification yet, or the last one failed
    #[default]
    Unknown,
    TopEdgeUp,
    BottomEdgeUp,
    /// The USB connector side points up
    LeftEdgeUp,
    RightEdgeUp,
    /// Display faces the ceiling
    FaceUp,
    /// Display faces the ground
    FaceDown,
}

impl OrientationState {
    pub fn label(self) -> &'static str {
        match self {
            OrientationState::Unknown => "UNKNOWN",
            OrientationState::TopEdgeUp => "TOP_EDGE",
            OrientationState::BottomEdgeUp => "BOTTOM_EDGE",
            OrientationState::LeftEdgeUp => "LEFT_EDGE",
            OrientationState::RightEdgeUp => "RIGHT_EDGE",
            OrientationState::FaceUp => "DISP_UP",
            OrientationState::FaceDown => "DISP_DOWN",
        }
    }
}

/// Classify `sample` by the axis most aligned with gravity.
///
/// z wins only when its magnitude is strictly greater than both others, then
/// y when strictly greater than x; everything else, ties included, falls back
/// to x. The sign of the winning axis picks the side.
pub fn classify(sample: AccelerationSample) -> OrientationState {
    // unsigned_abs keeps i16::MIN representable
    let abs_x = sample.x.unsigned_abs();
    let abs_y = sample.y.unsigned_abs();
    let abs_z = sample.z.unsigned_abs();

    if abs_z > abs_x && abs_z > abs_y {
        if sample.z < 0 {
            OrientationState::FaceDown
        } else {
            OrientationState::FaceUp
        }
    } else if abs_y > abs_x {
        if sample.y > 0 {
            OrientationState::BottomEdgeUp
        } else {
            OrientationState::TopEdgeUp
        }
    } else if sample.x < 0 {
        OrientationState::RightEdgeUp
    } else {
        OrientationState::LeftEdgeUp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrientationState::*;

    fn at(x: i16, y: i16, z: i16) -> OrientationState {
        classify(AccelerationSample::new(x, y, z))
    }

    #[test]
    fn dominant_axis_scenarios() {
        assert_eq!(at(10, 20, 900), FaceUp);
        assert_eq!(at(10, 20, -900), FaceDown);
        assert_eq!(at(50, 700, 100), BottomEdgeUp);
        assert_eq!(at(50, -700, 100), TopEdgeUp);
        assert_eq!(at(-600, 50, 100), RightEdgeUp);
        assert_eq!(at(600, 50, 100), LeftEdgeUp);
    }

    #[test]
    fn zero_components_take_the_non_negative_side() {
        assert_eq!(at(0, 0, 0), LeftEdgeUp);
        assert_eq!(at(0, 0, 1), FaceUp);
        assert_eq!(at(0, -1, 0), TopEdgeUp);
    }

    #[test]
    fn ties_fall_through_z_then_y_then_x() {
        // |z| == |y| > |x|: z is not strictly largest, y is
        assert_eq!(at(1, 500, 500), BottomEdgeUp);
        assert_eq!(at(1, -500, -500), TopEdgeUp);

        // |z| == |x| > |y|: falls through to x
        assert_eq!(at(-500, 1, 500), RightEdgeUp);

        // |y| == |x| > |z|: falls through to x
        assert_eq!(at(500, -500, 1), LeftEdgeUp);

        // all equal
        assert_eq!(at(-300, 300, 300), RightEdgeUp);
    }

    #[test]
    fn extreme_values() {
        assert_eq!(at(0, 0, i16::MIN), FaceDown);
        assert_eq!(at(i16::MIN, 0, i16::MAX), RightEdgeUp);
        assert_eq!(at(0, i16::MAX, i16::MIN), FaceDown);
        assert_eq!(at(0, i16::MIN, i16::MAX), TopEdgeUp);
    }

    #[test]
    fn sweep_matches_dominance_rules() {
        let values = [-900i16, -300, -1, 0, 1, 300, 900];
        for &x in &values {
            for &y in &values {
                for &z in &values {
                    let (ax, ay, az) = (x.unsigned_abs(), y.unsigned_abs(), z.unsigned_abs());
                    let expected = if az > ax && az > ay {
                        if z < 0 { FaceDown } else { FaceUp }
                    } else if ay > ax && ay >= az {
                        if y > 0 { BottomEdgeUp } else { TopEdgeUp }
                    } else if x < 0 {
                        RightEdgeUp
                    } else {
                        LeftEdgeUp
                    };
                    let sample = AccelerationSample::new(x, y, z);
                    assert_eq!(classify(sample), expected, "{:?}", sample);
                    // same input, same answer
                    assert_eq!(classify(sample), classify(sample));
                }
            }
        }
    }

    #[test]
    fn converts_from_accelerometer_vector() {
        let sample = AccelerationSample::from(I16x3 { x: -1, y: 2, z: -3 });
        assert_eq!(sample, AccelerationSample::new(-1, 2, -3));
    }
}
