//! Error types for balance solves.

use fc_atmosphere::AtmosphereError;
use fc_core::units::{Pressure, Temperature, k, pa};
use fc_flow::FlowError;
use nalgebra::Vector2;
use std::fmt;
use thiserror::Error;

/// Total conditions at one Newton iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iterate {
    pub total_temperature: Temperature,
    pub total_pressure: Pressure,
}

impl Iterate {
    pub(crate) fn from_unknowns(x: &Vector2<f64>) -> Self {
        Self {
            total_temperature: k(x[0]),
            total_pressure: pa(x[1]),
        }
    }
}

impl fmt::Display for Iterate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tt={:.6} K, Pt={:.3} Pa",
            self.total_temperature.value, self.total_pressure.value
        )
    }
}

/// Diagnostic state of the last iterate of a failed solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub iterate: Iterate,
    /// Static temperature residual [K]
    pub residual_temperature: f64,
    /// Static pressure residual [Pa]
    pub residual_pressure: f64,
    pub residual_norm: f64,
    /// Newton updates taken
    pub iterations: usize,
    /// Residual norm at the initial guess and after every update
    pub residual_history: Vec<f64>,
}

/// Errors that can occur during a balance solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Altitude {altitude_m} m outside atmosphere domain [{floor_m}, {ceiling_m}] m")]
    OutOfRangeAltitude {
        altitude_m: f64,
        floor_m: f64,
        ceiling_m: f64,
    },

    #[error("Non-physical input: {what}")]
    NonPhysicalInput { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Singular Jacobian at {iterate} (condition estimate {condition:e})")]
    SingularJacobian { iterate: Iterate, condition: f64 },

    #[error(
        "No convergence after {} iterations at {}, residual norm {:e}",
        .0.iterations, .0.iterate, .0.residual_norm
    )]
    NonConvergence(Box<SolveReport>),

    #[error("Flow evaluator failed at {iterate}: {source}")]
    FlowEvaluatorFailure { iterate: Iterate, source: FlowError },

    #[error("Atmosphere error: {0}")]
    Atmosphere(AtmosphereError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<AtmosphereError> for SolverError {
    fn from(e: AtmosphereError) -> Self {
        match e {
            AtmosphereError::OutOfRangeAltitude {
                altitude_m,
                floor_m,
                ceiling_m,
            } => SolverError::OutOfRangeAltitude {
                altitude_m,
                floor_m,
                ceiling_m,
            },
            AtmosphereError::NonPhysical { what } => SolverError::NonPhysicalInput {
                what: what.to_string(),
            },
            other => SolverError::Atmosphere(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_lifted() {
        let err: SolverError = AtmosphereError::OutOfRangeAltitude {
            altitude_m: 1.0e5,
            floor_m: 0.0,
            ceiling_m: 8.6e4,
        }
        .into();
        assert!(matches!(err, SolverError::OutOfRangeAltitude { .. }));
    }

    #[test]
    fn non_physical_atmosphere_is_input_error() {
        let err: SolverError = AtmosphereError::NonPhysical {
            what: "effective static temperature",
        }
        .into();
        assert_eq!(
            err,
            SolverError::NonPhysicalInput {
                what: "effective static temperature".to_string()
            }
        );
    }

    #[test]
    fn flow_failure_keeps_source() {
        use std::error::Error;
        let err = SolverError::FlowEvaluatorFailure {
            iterate: Iterate::from_unknowns(&Vector2::new(300.0, 5.0e4)),
            source: FlowError::NonPhysical { what: "pressure" },
        };
        assert!(err.to_string().contains("Tt=300.000000 K"));
        assert!(err.source().is_some());
    }

    #[test]
    fn non_convergence_display() {
        let err = SolverError::NonConvergence(Box::new(SolveReport {
            iterate: Iterate::from_unknowns(&Vector2::new(277.0, 1.0e5)),
            residual_temperature: 1.0,
            residual_pressure: 2.0,
            residual_norm: 5.0_f64.sqrt(),
            iterations: 10,
            residual_history: vec![],
        }));
        assert!(err.to_string().contains("after 10 iterations"));
    }
}
