use crate::{FcError, FcResult};

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Paired absolute/relative tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Allowed magnitude of a residual measured against `reference`.
    ///
    /// `abs + rel * |reference|`, the dual test used for every balance check.
    pub fn allowance(&self, reference: Real) -> Real {
        self.abs + self.rel * reference.abs()
    }

    /// True when `|residual| <= abs + rel * |reference|`.
    pub fn accepts(&self, residual: Real, reference: Real) -> bool {
        residual.abs() <= self.allowance(reference)
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> FcResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FcError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> FcResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(FcError::InvalidArg { what })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1.0, "x").is_ok());
        assert_eq!(
            ensure_positive(0.0, "x"),
            Err(FcError::InvalidArg { what: "x" })
        );
        assert!(ensure_positive(-3.0, "x").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "x"),
            Err(FcError::NonFinite { .. })
        ));
    }

    #[test]
    fn dual_tolerance_scales_with_reference() {
        let tol = Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        };
        // 1e5 reference widens the band to ~1e-5
        assert!(tol.accepts(5e-6, 1e5));
        assert!(!tol.accepts(5e-6, 1.0));
        assert!(tol.accepts(-5e-11, 0.0));
    }
}
