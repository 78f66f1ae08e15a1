//! Residual formulation of the flight-condition balance.
//!
//! Unknowns are `x = [Tt, Pt]` in K and Pa. Residuals are
//! `[Ts(x) - T_target, Ps(x) - P_target]`, where the statics come from the flow
//! evaluator at the fixed Mach number, mass flow and composition.

use crate::error::{Iterate, SolverError, SolverResult};
use crate::jacobian::difference_jacobian;
use fc_core::units::{MassRate, k, pa};
use fc_flow::{Composition, FlowError, FlowEvaluator, FlowInput, FlowStation};
use nalgebra::{Matrix2, Vector2};

/// Balance between a flow station and a fixed ambient target.
pub struct BalanceProblem<'a, F: FlowEvaluator + ?Sized> {
    flow: &'a F,
    /// Static temperature and pressure targets [K, Pa]
    target: Vector2<f64>,
    mach: f64,
    mass_flow: MassRate,
    composition: &'a Composition,
}

impl<'a, F: FlowEvaluator + ?Sized> BalanceProblem<'a, F> {
    pub fn new(
        flow: &'a F,
        target: Vector2<f64>,
        mach: f64,
        mass_flow: MassRate,
        composition: &'a Composition,
    ) -> Self {
        Self {
            flow,
            target,
            mach,
            mass_flow,
            composition,
        }
    }

    fn input(&self, x: &Vector2<f64>) -> FlowInput<'a> {
        FlowInput::new(pa(x[1]), k(x[0]), self.mach, self.mass_flow, self.composition)
    }

    fn lift(x: &Vector2<f64>) -> impl FnOnce(FlowError) -> SolverError {
        let iterate = Iterate::from_unknowns(x);
        move |source| SolverError::FlowEvaluatorFailure { iterate, source }
    }

    /// Flow station at the unknowns `x`.
    pub fn station(&self, x: &Vector2<f64>) -> SolverResult<FlowStation> {
        self.flow.evaluate(&self.input(x)).map_err(Self::lift(x))
    }

    pub fn residual(&self, x: &Vector2<f64>) -> SolverResult<Vector2<f64>> {
        let station = self.station(x)?;
        let r = Vector2::new(
            station.static_temperature.value - self.target[0],
            station.static_pressure.value - self.target[1],
        );
        if r.iter().all(|v| v.is_finite()) {
            Ok(r)
        } else {
            Err(Self::lift(x)(FlowError::NonPhysical {
                what: "non-finite static state",
            }))
        }
    }

    /// Jacobian of the residual at `x`.
    ///
    /// The targets are constant, so this is the evaluator's static-to-total
    /// Jacobian. Evaluators without one are differenced, never below `lower`.
    pub fn jacobian(
        &self,
        x: &Vector2<f64>,
        r: &Vector2<f64>,
        fd_step: f64,
        lower: &Vector2<f64>,
    ) -> SolverResult<Matrix2<f64>> {
        match self.flow.jacobian(&self.input(x)).map_err(Self::lift(x))? {
            Some(j) => {
                let [[ts_tt, ts_pt], [ps_tt, ps_pt]] = j.rows();
                Ok(Matrix2::new(ts_tt, ts_pt, ps_tt, ps_pt))
            }
            None => difference_jacobian(x, r, |xp| self.residual(xp), fd_step, lower),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::units::kgps;
    use fc_flow::{PerfectGasFlow, ThermallyPerfectFlow};

    #[test]
    fn residual_vanishes_at_rest() {
        let air = Composition::air();
        let flow = PerfectGasFlow::default();
        let problem = BalanceProblem::new(&flow, Vector2::new(250.0, 5.0e4), 0.0, kgps(1.0), &air);
        let r = problem.residual(&Vector2::new(250.0, 5.0e4)).unwrap();
        assert!(r.norm() < 1e-9);
    }

    #[test]
    fn analytic_and_differenced_agree() {
        let air = Composition::air();
        let flow = PerfectGasFlow::default();
        let problem = BalanceProblem::new(&flow, Vector2::new(220.0, 3.0e4), 0.8, kgps(40.0), &air);
        let x = Vector2::new(260.0, 4.5e4);
        let r = problem.residual(&x).unwrap();
        let lower = Vector2::new(1e-3, 1e-3);
        let analytic = problem.jacobian(&x, &r, 1e-6, &lower).unwrap();
        let differenced =
            difference_jacobian(&x, &r, |xp| problem.residual(xp), 1e-6, &lower).unwrap();
        for (a, d) in analytic.iter().zip(differenced.iter()) {
            assert!((a - d).abs() <= 1e-6 * a.abs().max(1.0), "{a} vs {d}");
        }
    }

    #[test]
    fn analytic_jacobian_keeps_row_layout() {
        let air = Composition::air();
        let flow = ThermallyPerfectFlow::default();
        let problem = BalanceProblem::new(&flow, Vector2::new(220.0, 3.0e4), 0.8, kgps(40.0), &air);
        let x = Vector2::new(260.0, 4.5e4);
        let r = problem.residual(&x).unwrap();
        let jac = problem
            .jacobian(&x, &r, 1e-6, &Vector2::new(1e-3, 1e-3))
            .unwrap();

        let input = FlowInput::new(pa(x[1]), k(x[0]), 0.8, kgps(40.0), &air);
        let expected = flow.jacobian(&input).unwrap().unwrap();
        assert_eq!(jac[(0, 0)], expected.ts_tt);
        assert_eq!(jac[(0, 1)], expected.ts_pt);
        assert_eq!(jac[(1, 0)], expected.ps_tt);
        assert_eq!(jac[(1, 1)], expected.ps_pt);
        assert!(expected.ps_tt != 0.0);
    }

    #[test]
    fn evaluator_errors_carry_the_iterate() {
        let air = Composition::air();
        let flow = PerfectGasFlow::default();
        let problem = BalanceProblem::new(&flow, Vector2::new(220.0, 3.0e4), 0.8, kgps(40.0), &air);
        let err = problem.residual(&Vector2::new(-5.0, 4.5e4)).unwrap_err();
        match err {
            SolverError::FlowEvaluatorFailure { iterate, .. } => {
                assert_eq!(iterate.total_temperature.value, -5.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
