//! Flight-condition equilibrium solver.

use crate::balance::BalanceProblem;
use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult};
use crate::newton::{NewtonSettings, bounded_newton};
use fc_atmosphere::{Ambient, AmbientState, AtmosphereLookup};
use fc_core::units::{Length, MassRate, Pressure, TempInterval, Temperature, delta_k, k, pa};
use fc_flow::{Composition, FlowEvaluator, FlowStation};
use nalgebra::Vector2;
use tracing::{debug, debug_span, warn};

/// One flight condition to balance.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingPoint {
    /// Geometric altitude
    pub altitude: Length,
    pub mach: f64,
    pub mass_flow: MassRate,
    /// Offset added to the standard-day static temperature
    pub temperature_delta: TempInterval,
    pub composition: Composition,
}

impl OperatingPoint {
    /// Standard day, dry air.
    pub fn new(altitude: Length, mach: f64, mass_flow: MassRate) -> Self {
        Self {
            altitude,
            mach,
            mass_flow,
            temperature_delta: delta_k(0.0),
            composition: Composition::air(),
        }
    }

    pub fn with_temperature_delta(mut self, delta: TempInterval) -> Self {
        self.temperature_delta = delta;
        self
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    /// Every combination of `altitudes` and `machs` at one mass flow, altitude
    /// major.
    pub fn grid(altitudes: &[Length], machs: &[f64], mass_flow: MassRate) -> Vec<Self> {
        altitudes
            .iter()
            .flat_map(|&alt| machs.iter().map(move |&mach| Self::new(alt, mach, mass_flow)))
            .collect()
    }
}

/// Balanced flight condition.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightConditions {
    /// Static targets the flow was balanced against
    pub ambient: AmbientState,
    /// Flow station at the converged totals
    pub station: FlowStation,
    pub total_temperature: Temperature,
    pub total_pressure: Pressure,
    pub converged: bool,
    /// Newton updates taken
    pub iterations: usize,
    pub residual_temperature: f64,
    pub residual_pressure: f64,
    pub residual_norm: f64,
    pub residual_history: Vec<f64>,
}

/// Finds the total temperature and pressure whose flow station reproduces the
/// ambient static state.
///
/// The solver holds only shared references and a copy of its configuration,
/// so independent solves may run concurrently from one instance.
pub struct EquilibriumSolver<'a, F: FlowEvaluator + ?Sized> {
    ambient: Ambient<'a>,
    flow: &'a F,
    config: SolverConfig,
}

impl<'a, F: FlowEvaluator + ?Sized> EquilibriumSolver<'a, F> {
    pub fn new(
        lookup: &'a AtmosphereLookup,
        flow: &'a F,
        config: SolverConfig,
    ) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self {
            ambient: Ambient::new(lookup),
            flow,
            config,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn flow(&self) -> &'a F {
        self.flow
    }

    /// Balance `point` starting from the configured initial guess.
    pub fn solve(&self, point: &OperatingPoint) -> SolverResult<FlightConditions> {
        let guess = Vector2::new(
            self.config.initial_temperature.value,
            self.config.initial_pressure.value,
        );
        self.solve_from(point, guess)
    }

    /// Balance `point` starting from the totals of an earlier solution.
    pub fn warm_start(
        &self,
        point: &OperatingPoint,
        previous: &FlightConditions,
    ) -> SolverResult<FlightConditions> {
        let config = self
            .config
            .with_initial_guess(previous.total_temperature, previous.total_pressure);
        config.validate()?;
        let guess = Vector2::new(previous.total_temperature.value, previous.total_pressure.value);
        self.solve_from(point, guess)
    }

    fn solve_from(
        &self,
        point: &OperatingPoint,
        guess: Vector2<f64>,
    ) -> SolverResult<FlightConditions> {
        let span = debug_span!(
            "solve",
            flow = self.flow.name(),
            altitude_m = point.altitude.value,
            mach = point.mach
        );
        let _enter = span.enter();

        self.check_point(point)?;
        let ambient = self
            .ambient
            .evaluate(point.altitude, point.temperature_delta)?;
        let target = Vector2::new(
            ambient.static_temperature.value,
            ambient.static_pressure.value,
        );
        debug!(
            target_t = target[0],
            target_p = target[1],
            extrapolated = ambient.extrapolated,
            "ambient target"
        );

        let problem = BalanceProblem::new(
            self.flow,
            target,
            point.mach,
            point.mass_flow,
            &point.composition,
        );
        let lower = Vector2::new(
            self.config.lower_bound_temperature.value,
            self.config.lower_bound_pressure.value,
        );
        let settings = NewtonSettings {
            tolerances: self.config.tolerances(),
            max_iterations: self.config.max_iterations,
            lower_bounds: lower,
            max_condition: self.config.max_condition,
        };

        let result = bounded_newton(
            guess,
            target,
            |x| problem.residual(x),
            |x, r| problem.jacobian(x, r, self.config.fd_step, &lower),
            &settings,
        )
        .inspect_err(|e| warn!(error = %e, "balance failed"))?;

        let station = problem.station(&result.x)?;
        Ok(FlightConditions {
            ambient,
            station,
            total_temperature: k(result.x[0]),
            total_pressure: pa(result.x[1]),
            converged: true,
            iterations: result.iterations,
            residual_temperature: result.residual[0],
            residual_pressure: result.residual[1],
            residual_norm: result.residual_norm,
            residual_history: result.residual_history,
        })
    }

    /// Reject inputs no iterate could satisfy, before any flow evaluation.
    fn check_point(&self, point: &OperatingPoint) -> SolverResult<()> {
        if !point.altitude.value.is_finite() {
            return Err(SolverError::NonPhysicalInput {
                what: "altitude must be finite".to_string(),
            });
        }
        if !(point.mach.is_finite() && point.mach >= 0.0) {
            return Err(SolverError::NonPhysicalInput {
                what: format!("Mach number {} must be non-negative and finite", point.mach),
            });
        }
        let w = point.mass_flow.value;
        if !(w.is_finite() && w > 0.0) {
            return Err(SolverError::NonPhysicalInput {
                what: format!("mass flow {w} kg/s must be positive and finite"),
            });
        }
        if !point.temperature_delta.value.is_finite() {
            return Err(SolverError::NonPhysicalInput {
                what: "temperature delta must be finite".to_string(),
            });
        }
        if !self.flow.supports_composition(&point.composition) {
            return Err(SolverError::NonPhysicalInput {
                what: format!("flow model {} does not support the composition", self.flow.name()),
            });
        }
        Ok(())
    }
}
