//! Bounded Newton iteration on a 2x2 system.

use crate::error::{Iterate, SolveReport, SolverError, SolverResult};
use fc_core::numeric::Tolerances;
use nalgebra::{Matrix2, Vector2};
use tracing::{debug, trace};

/// Newton iteration settings.
#[derive(Debug, Clone, Copy)]
pub struct NewtonSettings {
    pub tolerances: Tolerances,
    /// Maximum Newton updates
    pub max_iterations: usize,
    /// Componentwise lower bounds on the unknowns
    pub lower_bounds: Vector2<f64>,
    /// Condition estimate above which the linear solve is refused
    pub max_condition: f64,
}

/// Converged Newton iterate.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonResult {
    pub x: Vector2<f64>,
    pub residual: Vector2<f64>,
    pub residual_norm: f64,
    /// Newton updates taken
    pub iterations: usize,
    /// Residual norm at the guess and after every update
    pub residual_history: Vec<f64>,
}

/// Solve `r(x) = 0` for `x >= lower_bounds` starting from `x0`.
///
/// Component `i` of the residual is accepted when
/// `|r_i| <= abs + rel * |reference_i|`. Each update solves `J dx = -r` by LU
/// factorization and is then scaled by the largest `alpha` in `[0, 1]` that
/// keeps every component at or above its bound. Components that land on a
/// bound are set to it exactly.
pub fn bounded_newton<F, J>(
    x0: Vector2<f64>,
    reference: Vector2<f64>,
    residual_fn: F,
    jacobian_fn: J,
    settings: &NewtonSettings,
) -> SolverResult<NewtonResult>
where
    F: Fn(&Vector2<f64>) -> SolverResult<Vector2<f64>>,
    J: Fn(&Vector2<f64>, &Vector2<f64>) -> SolverResult<Matrix2<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut history = vec![r.norm()];

    for iter in 0..=settings.max_iterations {
        // A zero budget reports the guess as non-converged without testing it.
        if settings.max_iterations > 0 && is_converged(&r, &reference, &settings.tolerances) {
            debug!(iterations = iter, residual_norm = r.norm(), "Newton converged");
            return Ok(NewtonResult {
                x,
                residual: r,
                residual_norm: r.norm(),
                iterations: iter,
                residual_history: history,
            });
        }
        if iter == settings.max_iterations {
            break;
        }

        let jac = jacobian_fn(&x, &r)?;
        let dx = solve_step(&jac, &r, &x, settings.max_condition)?;

        let alpha = step_length(&x, &dx, &settings.lower_bounds);
        if alpha < 1.0 {
            trace!(iter, alpha, "step clamped to lower bounds");
        }
        x = apply_step(&x, &dx, alpha, &settings.lower_bounds);

        r = residual_fn(&x)?;
        history.push(r.norm());
        debug!(
            iter,
            x0 = x[0],
            x1 = x[1],
            residual_norm = r.norm(),
            alpha,
            "Newton update"
        );
    }

    Err(SolverError::NonConvergence(Box::new(SolveReport {
        iterate: Iterate::from_unknowns(&x),
        residual_temperature: r[0],
        residual_pressure: r[1],
        residual_norm: r.norm(),
        iterations: settings.max_iterations,
        residual_history: history,
    })))
}

fn is_converged(r: &Vector2<f64>, reference: &Vector2<f64>, tol: &Tolerances) -> bool {
    r.iter()
        .zip(reference.iter())
        .all(|(ri, refi)| tol.accepts(*ri, *refi))
}

fn solve_step(
    jac: &Matrix2<f64>,
    r: &Vector2<f64>,
    x: &Vector2<f64>,
    max_condition: f64,
) -> SolverResult<Vector2<f64>> {
    let sv = jac.singular_values();
    let condition = if sv.min() > 0.0 {
        sv.max() / sv.min()
    } else {
        f64::INFINITY
    };
    let singular = || SolverError::SingularJacobian {
        iterate: Iterate::from_unknowns(x),
        condition,
    };
    if !(condition <= max_condition) {
        return Err(singular());
    }

    let dx = jac.lu().solve(&(-r)).ok_or_else(singular)?;
    if dx.iter().all(|v| v.is_finite()) {
        Ok(dx)
    } else {
        Err(singular())
    }
}

/// Largest `alpha` in `[0, 1]` with `x + alpha * dx >= lower`.
fn step_length(x: &Vector2<f64>, dx: &Vector2<f64>, lower: &Vector2<f64>) -> f64 {
    let mut alpha: f64 = 1.0;
    for i in 0..2 {
        if x[i] + dx[i] < lower[i] {
            alpha = alpha.min(((lower[i] - x[i]) / dx[i]).max(0.0));
        }
    }
    alpha
}

/// `x + alpha * dx`, with the components that limited `alpha` placed exactly on
/// their bounds.
fn apply_step(
    x: &Vector2<f64>,
    dx: &Vector2<f64>,
    alpha: f64,
    lower: &Vector2<f64>,
) -> Vector2<f64> {
    let mut next = x + dx * alpha;
    for i in 0..2 {
        let binding = x[i] + dx[i] < lower[i] && (lower[i] - x[i]) / dx[i] <= alpha;
        if binding || next[i] < lower[i] {
            next[i] = lower[i];
        }
    }
    next
}
