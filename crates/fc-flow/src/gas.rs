//! Mixture gas properties with `cp(T) = cp0 + cp1 T`.

use crate::error::{FlowError, FlowResult};

/// Specific enthalpy [J/kg], referenced to zero at 0 K.
pub type SpecEnthalpy = f64;

/// Specific heat capacity [J/(kg K)].
pub type SpecHeatCapacity = f64;

/// Temperature range over which mixtures are checked for `cp > R`.
const VALID_RANGE_K: (f64, f64) = (1.0, 4_000.0);

/// Ideal-gas properties of a fixed composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasProperties {
    /// Specific gas constant [J/(kg K)]
    pub gas_constant: f64,
    /// Constant part of cp [J/(kg K)]
    pub cp0: f64,
    /// Temperature slope of cp [J/(kg K^2)]
    pub cp1: f64,
}

impl GasProperties {
    pub fn cp(&self, t: f64) -> SpecHeatCapacity {
        self.cp0 + self.cp1 * t
    }

    pub fn enthalpy(&self, t: f64) -> SpecEnthalpy {
        t * (self.cp0 + 0.5 * self.cp1 * t)
    }

    /// Temperature part of the entropy, `integral cp/T dT` [J/(kg K)].
    pub fn entropy_function(&self, t: f64) -> f64 {
        self.cp0 * t.ln() + self.cp1 * t
    }

    pub fn gamma(&self, t: f64) -> f64 {
        let cp = self.cp(t);
        cp / (cp - self.gas_constant)
    }

    /// d(gamma)/dT [1/K]
    pub fn gamma_slope(&self, t: f64) -> f64 {
        let cv = self.cp(t) - self.gas_constant;
        -self.gas_constant * self.cp1 / (cv * cv)
    }

    pub fn speed_of_sound(&self, t: f64) -> f64 {
        (self.gamma(t) * self.gas_constant * t).sqrt()
    }

    /// True when `R > 0` and `cp > R` across the supported temperature range.
    pub fn is_physical(&self) -> bool {
        let (lo, hi) = VALID_RANGE_K;
        self.gas_constant.is_finite()
            && self.gas_constant > 0.0
            && self.cp0.is_finite()
            && self.cp1.is_finite()
            && self.cp(lo) > self.gas_constant
            && self.cp(hi) > self.gas_constant
    }

    /// `gamma(t)`, rejecting temperatures where `cp <= R`.
    pub fn checked_gamma(&self, t: f64) -> FlowResult<f64> {
        let gamma = self.gamma(t);
        if gamma.is_finite() && gamma > 1.0 {
            Ok(gamma)
        } else {
            Err(FlowError::NonPhysical {
                what: "heat capacity ratio",
            })
        }
    }
}
