//! Flow evaluation errors.

use fc_core::FcError;
use thiserror::Error;

/// Result type for flow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur while evaluating a flow station.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Non-physical values (negative pressure, temperature, Mach, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Composition rejected (empty, negative fractions, bad mix ratio).
    #[error("Invalid composition: {what}")]
    InvalidComposition { what: &'static str },

    /// Internal iteration did not converge.
    #[error("Convergence failed for {what} after {iterations} iterations")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
    },

    /// Operation not supported by this evaluator.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },
}

impl From<FcError> for FlowError {
    fn from(err: FcError) -> Self {
        match err {
            FcError::NonFinite { what, .. } | FcError::InvalidArg { what } => {
                FlowError::NonPhysical { what }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlowError::NonPhysical { what: "pressure" };
        assert!(err.to_string().contains("pressure"));

        let err = FlowError::ConvergenceFailed {
            what: "static temperature",
            iterations: 50,
        };
        assert!(err.to_string().contains("50 iterations"));
    }

    #[test]
    fn fc_error_conversion() {
        let err: FlowError = FcError::InvalidArg { what: "mach" }.into();
        assert_eq!(err, FlowError::NonPhysical { what: "mach" });
    }
}
