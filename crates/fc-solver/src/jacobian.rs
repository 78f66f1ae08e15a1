//! Finite-difference linearization of the 2x2 balance residual.

use crate::error::SolverResult;
use nalgebra::{Matrix2, Vector2};

/// Differenced Jacobian of `f` at `x`, given `f_x = f(x)`.
///
/// Each column uses a central difference with step `epsilon * max(|x_j|, 1)`.
/// When the backward point would fall below `lower[j]` the column falls back to
/// a forward difference that reuses `f_x`, so `f` is never called outside the
/// bounds.
pub fn difference_jacobian<F>(
    x: &Vector2<f64>,
    f_x: &Vector2<f64>,
    f: F,
    epsilon: f64,
    lower: &Vector2<f64>,
) -> SolverResult<Matrix2<f64>>
where
    F: Fn(&Vector2<f64>) -> SolverResult<Vector2<f64>>,
{
    let mut jac = Matrix2::zeros();

    for j in 0..2 {
        let dx = epsilon * x[j].abs().max(1.0);

        let mut x_plus = *x;
        x_plus[j] += dx;
        let f_plus = f(&x_plus)?;

        let column = if x[j] - dx >= lower[j] {
            let mut x_minus = *x;
            x_minus[j] -= dx;
            let f_minus = f(&x_minus)?;
            (f_plus - f_minus) / (2.0 * dx)
        } else {
            (f_plus - f_x) / dx
        };

        jac.set_column(j, &column);
    }

    Ok(jac)
}
