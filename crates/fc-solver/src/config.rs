//! Solver configuration.

use crate::error::{SolverError, SolverResult};
use fc_core::numeric::Tolerances;
use fc_core::units::{Pressure, Temperature, deg_r, psi};

/// Balance solver settings.
///
/// A residual component is accepted when `|r| <= abs_tol + rel_tol * |target|`
/// holds for the static temperature and the static pressure together.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Absolute tolerance on each residual component (SI)
    pub abs_tol: f64,
    /// Relative tolerance, scaled by the magnitude of each target
    pub rel_tol: f64,
    /// Maximum Newton updates. Zero always fails after evaluating the guess.
    pub max_iterations: usize,
    /// No iterate may carry a total temperature below this
    pub lower_bound_temperature: Temperature,
    /// No iterate may carry a total pressure below this
    pub lower_bound_pressure: Pressure,
    /// Starting total temperature, 500 degR by default
    pub initial_temperature: Temperature,
    /// Starting total pressure, 14.696 psi by default
    pub initial_pressure: Pressure,
    /// Relative perturbation for finite-difference linearization
    pub fd_step: f64,
    /// Linear systems whose condition estimate exceeds this are singular
    pub max_condition: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            abs_tol: 1e-10,
            rel_tol: 1e-10,
            max_iterations: 10,
            lower_bound_temperature: deg_r(1e-4),
            lower_bound_pressure: psi(1e-4),
            initial_temperature: deg_r(500.0),
            initial_pressure: psi(14.696),
            fd_step: 1e-6,
            max_condition: 1e14,
        }
    }
}

impl SolverConfig {
    pub fn with_initial_guess(mut self, temperature: Temperature, pressure: Pressure) -> Self {
        self.initial_temperature = temperature;
        self.initial_pressure = pressure;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_lower_bounds(mut self, temperature: Temperature, pressure: Pressure) -> Self {
        self.lower_bound_temperature = temperature;
        self.lower_bound_pressure = pressure;
        self
    }

    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            abs: self.abs_tol,
            rel: self.rel_tol,
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if !(self.abs_tol.is_finite() && self.abs_tol >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "absolute tolerance must be finite and non-negative",
            });
        }
        if !(self.rel_tol.is_finite() && self.rel_tol >= 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "relative tolerance must be finite and non-negative",
            });
        }
        let t_lb = self.lower_bound_temperature.value;
        let p_lb = self.lower_bound_pressure.value;
        if !(t_lb.is_finite() && t_lb > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "temperature lower bound must be positive and finite",
            });
        }
        if !(p_lb.is_finite() && p_lb > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "pressure lower bound must be positive and finite",
            });
        }
        let t0 = self.initial_temperature.value;
        let p0 = self.initial_pressure.value;
        if !(t0.is_finite() && t0 >= t_lb) {
            return Err(SolverError::InvalidConfig {
                what: "initial temperature must be finite and not below its bound",
            });
        }
        if !(p0.is_finite() && p0 >= p_lb) {
            return Err(SolverError::InvalidConfig {
                what: "initial pressure must be finite and not below its bound",
            });
        }
        if !(self.fd_step.is_finite() && self.fd_step > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "finite-difference step must be positive",
            });
        }
        if !(self.max_condition > 1.0) {
            return Err(SolverError::InvalidConfig {
                what: "condition limit must exceed one",
            });
        }
        Ok(())
    }
}
