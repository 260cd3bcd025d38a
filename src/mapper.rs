use crate::error::MotionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clamp {
    Clamped,
    Unclamped,
}

/// Linearly rescales `value` from `input` into `output`.
///
/// A zero-width or non-finite input range is rejected rather than resolved to
/// a midpoint. Call sites that evaluate every frame should build a
/// [`RangeMap`] once and use [`RangeMap::apply`] instead.
pub fn map(
    value: f64,
    input: (f64, f64),
    output: (f64, f64),
    clamp: Clamp,
) -> Result<f64, MotionError> {
    let range = RangeMap::new(input, output)?;
    Ok(match clamp {
        Clamp::Clamped => range.clamped().apply(value),
        Clamp::Unclamped => range.apply(value),
    })
}

/// A validated linear mapping between two ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMap {
    input_min: f64,
    input_max: f64,
    output_min: f64,
    output_max: f64,
    clamp: Clamp,
}

impl RangeMap {
    pub fn new(input: (f64, f64), output: (f64, f64)) -> Result<Self, MotionError> {
        let (input_min, input_max) = input;
        let (output_min, output_max) = output;

        let width = input_max - input_min;
        if !width.is_finite() || width == 0.0 {
            return Err(MotionError::DegenerateRange {
                min: input_min,
                max: input_max,
            });
        }

        if !output_min.is_finite() || !output_max.is_finite() {
            return Err(MotionError::InvalidOutputRange {
                min: output_min,
                max: output_max,
            });
        }

        Ok(Self {
            input_min,
            input_max,
            output_min,
            output_max,
            clamp: Clamp::Unclamped,
        })
    }

    /// Symmetric map `[-input, input] -> [-output, output]`.
    pub fn symmetric(input: f64, output: f64) -> Result<Self, MotionError> {
        Self::new((-input, input), (-output, output))
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = Clamp::Clamped;
        self
    }

    pub fn apply(&self, value: f64) -> f64 {
        let mut t = (value - self.input_min) / (self.input_max - self.input_min);
        if self.clamp == Clamp::Clamped {
            t = t.clamp(0.0, 1.0);
        }
        self.output_min + (self.output_max - self.output_min) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_midpoint() {
        let range = RangeMap::new((0.0, 100.0), (8.0, 16.0)).expect("valid range");

        assert_eq!(range.apply(0.0), 8.0);
        assert_eq!(range.apply(50.0), 12.0);
        assert_eq!(range.apply(100.0), 16.0);
    }

    #[test]
    fn inverted_output_range_flips_direction() {
        let rotate_x = RangeMap::new((-0.5, 0.5), (7.0, -7.0)).expect("valid range");

        assert_eq!(rotate_x.apply(-0.5), 7.0);
        assert_eq!(rotate_x.apply(0.0), 0.0);
        assert_eq!(rotate_x.apply(0.5), -7.0);
    }

    #[test]
    fn unclamped_map_extrapolates_past_the_input_edges() {
        let parallax = RangeMap::symmetric(640.0, 20.0).expect("valid range");

        assert_eq!(parallax.apply(1280.0), 40.0);
        assert_eq!(parallax.apply(-1280.0), -40.0);
    }

    #[test]
    fn clamped_map_stays_within_output_bounds() {
        let opacity = RangeMap::new((0.0, 100.0), (0.95, 0.98))
            .expect("valid range")
            .clamped();

        assert_eq!(opacity.apply(-50.0), 0.95);
        assert_eq!(opacity.apply(5_000.0), 0.98);
        for offset in [-10.0, 0.0, 12.5, 99.0, 250.0] {
            let value = opacity.apply(offset);
            assert!((0.95..=0.98).contains(&value), "{value} out of bounds");
        }
    }

    #[test]
    fn zero_width_input_is_rejected_at_construction() {
        let result = RangeMap::new((3.0, 3.0), (0.0, 1.0));

        assert_eq!(
            result,
            Err(MotionError::DegenerateRange { min: 3.0, max: 3.0 })
        );
        assert!(map(1.0, (0.0, 0.0), (0.0, 1.0), Clamp::Clamped).is_err());
    }

    #[test]
    fn non_finite_ranges_are_rejected() {
        assert!(RangeMap::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
        assert!(RangeMap::new((0.0, f64::INFINITY), (0.0, 1.0)).is_err());
        assert!(RangeMap::new((0.0, 1.0), (0.0, f64::NAN)).is_err());
    }

    #[test]
    fn repeated_calls_return_identical_results() {
        let first = map(37.5, (-100.0, 100.0), (-5.0, 5.0), Clamp::Unclamped);
        let second = map(37.5, (-100.0, 100.0), (-5.0, 5.0), Clamp::Unclamped);

        assert_eq!(first, second);
        assert_eq!(first, Ok(1.875));
    }
}
