//! Independent solves over many operating points.

use crate::error::SolverResult;
use crate::solve::{EquilibriumSolver, FlightConditions, OperatingPoint};
use fc_flow::FlowEvaluator;
use rayon::prelude::*;
use tracing::debug;

impl<F: FlowEvaluator + ?Sized> EquilibriumSolver<'_, F> {
    /// Solve every point in parallel. Results keep the order of `points`, and a
    /// failure at one point does not affect the others.
    pub fn sweep(&self, points: &[OperatingPoint]) -> Vec<SolverResult<FlightConditions>> {
        let results: Vec<_> = points.par_iter().map(|p| self.solve(p)).collect();
        debug!(
            points = points.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "sweep finished"
        );
        results
    }

    /// Solve the points in order, seeding each from the previous converged
    /// solution. Suited to finely spaced schedules.
    pub fn continuation(&self, points: &[OperatingPoint]) -> Vec<SolverResult<FlightConditions>> {
        let mut previous: Option<FlightConditions> = None;
        points
            .iter()
            .map(|p| {
                let result = match &previous {
                    Some(prev) => self.warm_start(p, prev),
                    None => self.solve(p),
                };
                if let Ok(fc) = &result {
                    previous = Some(fc.clone());
                }
                result
            })
            .collect()
    }
}
