//! Standard-day temperature offset.

use fc_core::units::{TempInterval, Temperature, k};

/// Partial derivatives of the effective temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetPartials {
    /// d(T_effective)/d(T_standard)
    pub standard: f64,
    /// d(T_effective)/d(delta)
    pub delta: f64,
}

/// `T_effective = T_standard + delta`, with no smoothing or clamping.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureOffset;

impl TemperatureOffset {
    pub const PARTIALS: OffsetPartials = OffsetPartials {
        standard: 1.0,
        delta: 1.0,
    };

    pub fn apply(standard: Temperature, delta: TempInterval) -> Temperature {
        k(Self::apply_k(standard.value, delta.value))
    }

    /// Same relation on raw kelvin values.
    #[inline]
    pub fn apply_k(standard_k: f64, delta_k: f64) -> f64 {
        standard_k + delta_k
    }

    pub fn partials() -> OffsetPartials {
        Self::PARTIALS
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offset_difference_is_delta(t in 1.0_f64..2_000.0, delta in -150.0_f64..150.0) {
            let shifted = TemperatureOffset::apply_k(t, delta);
            let base = TemperatureOffset::apply_k(t, 0.0);
            prop_assert_eq!(base, t);
            // rounding of the sum and of the difference, half an ulp each
            let ulp = 2.0 * f64::EPSILON * shifted.abs().max(t).max(delta.abs());
            prop_assert!(((shifted - base) - delta).abs() <= ulp);
        }

        #[test]
        fn offset_slope_is_exactly_one(t in 1.0_f64..2_000.0, delta in -150.0_f64..150.0) {
            // Integer-valued kelvin keeps the sums exact, exposing any scaling.
            let (t, delta) = (t.round(), delta.round());
            let shifted = TemperatureOffset::apply_k(t, delta);
            prop_assert_eq!(shifted - TemperatureOffset::apply_k(t, 0.0), delta);
            prop_assert_eq!(TemperatureOffset::apply_k(t + 1.0, delta) - shifted, 1.0);
        }
    }
}
